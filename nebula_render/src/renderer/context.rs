//! Device context boundary and backend encode extension point

use crate::error::Result;
use crate::renderer::Command;

/// Device/context boundary trait
///
/// The context owns the GPU device and its resources; the recording layer
/// only holds a shared reference to it and hands it back to the backend at
/// encode time. Backend selection happens here: each concrete context
/// creates the encoder for its own graphics API.
pub trait RenderContext: Send + Sync {
    /// Identity of the backend this context drives (e.g. "vulkan", "d3d12")
    fn backend_name(&self) -> &'static str;

    /// Create the encoder that translates recorded passes for this backend
    ///
    /// Called once per [`RenderPass`](crate::renderer::RenderPass) at
    /// construction.
    fn create_pass_encoder(&self) -> Box<dyn PassEncoder>;
}

/// Backend-specific encode hook
///
/// The sole extension point of the recording layer: one implementation per
/// concrete graphics API. The core imposes no constraints on the backend
/// beyond translating commands in the recorded sequence order.
pub trait PassEncoder: Send + Sync {
    /// Backend labeling hook for the pass
    ///
    /// Called by [`RenderPass::set_label`](crate::renderer::RenderPass::set_label)
    /// with non-empty labels only; no further validation is applied.
    fn set_label(&mut self, label: &str);

    /// Translate the finalized command sequence into backend-native form
    ///
    /// # Arguments
    ///
    /// * `context` - The device context the pass was created with
    /// * `commands` - The finalized commands, in recorded order
    fn encode(&self, context: &dyn RenderContext, commands: &[Command<'_>]) -> Result<()>;
}
