//! Sampler trait

/// Sampler resource trait
///
/// Implemented by backend-specific sampler types (e.g., VulkanSampler).
///
/// Samplers are borrowed, never owned, by the recording layer: a bound
/// sampler must outlive the [`RenderPass`](crate::renderer::RenderPass)
/// it is bound into. The borrow lifetime on the binding operations makes
/// the compiler enforce this.
pub trait Sampler: Send + Sync {}
