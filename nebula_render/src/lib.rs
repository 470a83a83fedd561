/*!
# Nebula Render

Core traits and types for the Nebula render-command recording layer.

This crate provides the hardware-agnostic API for recording draw commands
using trait-based dynamic polymorphism (similar to C++ virtual inheritance).
Backend encoders (Vulkan, Direct3D 12, etc.) plug in behind a single
extension point and translate the recorded command list at submission time.

## Architecture

- **Command**: one draw call's complete, self-contained state
- **ResourceBinder**: operation set for attaching resources to shader slots
- **RenderPass**: builder that validates and accumulates Commands for one
  render target
- **RenderContext / PassEncoder**: the device boundary and the
  backend-specific encode hook

Backend implementations provide concrete types that implement these traits.
*/

// Internal modules
mod error;
pub mod log;
pub mod renderer;

// Main nebula namespace module
pub mod nebula {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: render_* macros are NOT re-exported here - they are internal only
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
