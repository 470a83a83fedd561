//! Buffer trait and buffer views

use std::sync::Arc;
use crate::error::Result;

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., VulkanBuffer).
/// Allocation and lifetime management are the backend's responsibility;
/// the recording layer only references buffers through [`BufferView`]s.
pub trait Buffer: Send + Sync {
    /// Total size of the buffer in bytes
    fn size(&self) -> u64;

    /// Update buffer data
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;
}

/// A region of a buffer bound into a draw command
///
/// The underlying buffer is shared; a view keeps it alive at least until
/// the commands referencing it have been encoded.
#[derive(Clone)]
pub struct BufferView {
    /// The buffer this view refers to
    pub buffer: Arc<dyn Buffer>,
    /// Offset of the region in bytes
    pub offset: u64,
    /// Size of the region in bytes
    pub size: u64,
}

impl BufferView {
    /// Create a view over a region of a buffer
    pub fn new(buffer: Arc<dyn Buffer>, offset: u64, size: u64) -> Self {
        Self { buffer, offset, size }
    }

    /// Create a view covering the entire buffer
    pub fn whole(buffer: Arc<dyn Buffer>) -> Self {
        let size = buffer.size();
        Self { buffer, offset: 0, size }
    }

    /// An empty view references no bytes and is invalid wherever a
    /// buffer is required
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
