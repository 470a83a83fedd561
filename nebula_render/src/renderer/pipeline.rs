//! Pipeline trait

/// Pipeline resource trait
///
/// Implemented by backend-specific pipeline types (e.g., VulkanPipeline).
/// Pipeline-state-object construction happens outside the recording
/// layer; a command only references the compiled object.
pub trait Pipeline: Send + Sync {
    // No public methods for now, pipelines are referenced and bound by commands
}
