//! Stateless validation routines for command state
//!
//! Each routine checks one piece of draw state, reports failures through
//! the diagnostic log, and returns a success flag. Nothing here mutates
//! state or aborts; callers decide what a failure means.

use glam::UVec2;

use crate::renderer::{BufferView, IndexType, Rect2D, MAX_VERTEX_BUFFERS};

const SOURCE: &str = "nebula::validation";

/// Check a set of vertex buffers before it is bound
///
/// Fails if the set exceeds [`MAX_VERTEX_BUFFERS`] or any view in the set
/// is empty.
pub fn validate_vertex_buffers(buffers: &[BufferView]) -> bool {
    if buffers.len() > MAX_VERTEX_BUFFERS {
        crate::render_error!(
            SOURCE,
            "Attempted to bind {} vertex buffers, but the maximum is {}.",
            buffers.len(),
            MAX_VERTEX_BUFFERS
        );
        return false;
    }

    for view in buffers {
        if view.is_empty() {
            crate::render_error!(SOURCE, "Attempted to bind an invalid vertex buffer.");
            return false;
        }
    }

    true
}

/// Check an index buffer and element type before they are bound
///
/// `Unknown` always fails. `U16`/`U32` require a non-empty view. `None`
/// succeeds trivially; any supplied buffer is ignored.
pub fn validate_index_buffer(index_buffer: Option<&BufferView>, index_type: IndexType) -> bool {
    if index_type == IndexType::Unknown {
        crate::render_error!(SOURCE, "Cannot bind an index buffer with an unknown index type.");
        return false;
    }

    if index_type != IndexType::None && !index_buffer.is_some_and(|view| !view.is_empty()) {
        crate::render_error!(SOURCE, "Attempted to bind an invalid index buffer.");
        return false;
    }

    true
}

/// Check that a scissor rectangle lies fully inside the render target
///
/// The rectangle is in integer pixel space with origin top-left; target
/// bounds are `[0,0]..target_size`.
pub fn validate_scissor(scissor: Rect2D, target_size: UVec2) -> bool {
    let contained = scissor.x >= 0
        && scissor.y >= 0
        && scissor.x as u64 + scissor.width as u64 <= target_size.x as u64
        && scissor.y as u64 + scissor.height as u64 <= target_size.y as u64;

    if !contained {
        crate::render_error!(
            SOURCE,
            "Cannot apply a scissor that lies outside the bounds of the render target."
        );
    }

    contained
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
