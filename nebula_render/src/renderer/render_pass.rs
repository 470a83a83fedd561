//! RenderPass - records validated draw commands against one render target
//!
//! A pass is created bound to one render target and one device context.
//! Callers mutate a pending [`Command`] through the builder setters, then
//! finalize it with [`RenderPass::draw`]; finalized commands accumulate in
//! recorded order until [`RenderPass::encode_commands`] hands them to the
//! backend encoder.

use std::sync::Arc;
use glam::{Mat4, UVec2, Vec3};

use crate::error::{Error, Result};
use crate::renderer::{
    validation, BindingType, BufferView, Command, IndexType, PassEncoder, Pipeline, Rect2D,
    RenderContext, RenderTargetDesc, ResourceBinder, SampleCount, SampledImageSlot, Sampler,
    ShaderMetadata, ShaderStage, ShaderUniformSlot, TextureFormat, VertexGeometry, Viewport,
};
use crate::renderer::Texture;

const SOURCE: &str = "nebula::RenderPass";

/// Projection from render-target pixel space to normalized device
/// coordinates
///
/// Maps `(0,0)` to `(-1,1)` and `(width,height)` to `(1,-1)`, with z fixed
/// at 0.5.
pub fn make_orthographic(size: UVec2) -> Mat4 {
    let scale = Mat4::from_scale(Vec3::new(2.0 / size.x as f32, -2.0 / size.y as f32, 0.0));
    let translate = Mat4::from_translation(Vec3::new(-1.0, 1.0, 0.5));
    translate * scale
}

/// Recording configuration
#[derive(Debug, Clone, Copy)]
pub struct RenderPassConfig {
    /// When false, command labels are dropped at the call site and never
    /// stored
    pub debug_labels: bool,
}

impl Default for RenderPassConfig {
    fn default() -> Self {
        Self {
            debug_labels: cfg!(debug_assertions),
        }
    }
}

/// One recording session bound to exactly one render target
///
/// The `'smp` lifetime covers every sampler bound into the pass; samplers
/// are borrowed, not owned, and must outlive the pass. Textures and
/// buffers are shared and stay alive at least until encode.
///
/// A pass is single-threaded: one logical recording thread per instance,
/// no mutation concurrent with an in-progress encode.
pub struct RenderPass<'smp> {
    /// Device context, used only at encode time
    context: Arc<dyn RenderContext>,

    /// Backend encoder, selected by the context at construction
    encoder: Box<dyn PassEncoder>,

    // State frozen at construction
    sample_count: SampleCount,
    pixel_format: TextureFormat,
    has_depth_attachment: bool,
    has_stencil_attachment: bool,
    target_size: UVec2,
    target: RenderTargetDesc,
    orthographic: Mat4,
    config: RenderPassConfig,

    /// Finalized commands in draw order (append-only during recording)
    commands: Vec<Command<'smp>>,

    /// The command currently being built
    pending: Command<'smp>,
}

impl<'smp> RenderPass<'smp> {
    /// Create a pass bound to a render target, with default configuration
    pub fn new(context: Arc<dyn RenderContext>, target: &RenderTargetDesc) -> Self {
        Self::with_config(context, target, RenderPassConfig::default())
    }

    /// Create a pass bound to a render target
    ///
    /// Captures sample count, pixel format, attachment presence, target
    /// size, and the orthographic projection from the target description;
    /// none of these change for the lifetime of the pass. The backend
    /// encoder is created here via the context.
    pub fn with_config(
        context: Arc<dyn RenderContext>,
        target: &RenderTargetDesc,
        config: RenderPassConfig,
    ) -> Self {
        let encoder = context.create_pass_encoder();
        let target_size = UVec2::new(target.width, target.height);

        Self {
            context,
            encoder,
            sample_count: target.sample_count,
            pixel_format: target.format,
            has_depth_attachment: target.depth_attachment.is_some(),
            has_stencil_attachment: target.stencil_attachment.is_some(),
            target_size,
            target: target.clone(),
            orthographic: make_orthographic(target_size),
            config,
            commands: Vec::new(),
            pending: Command::default(),
        }
    }

    // ===== ACCESSORS (all pure) =====

    /// Sample count of the render target
    pub fn sample_count(&self) -> SampleCount {
        self.sample_count
    }

    /// Pixel format of the render target
    pub fn pixel_format(&self) -> TextureFormat {
        self.pixel_format
    }

    /// Whether the render target has a depth attachment
    pub fn has_depth_attachment(&self) -> bool {
        self.has_depth_attachment
    }

    /// Whether the render target has a stencil attachment
    pub fn has_stencil_attachment(&self) -> bool {
        self.has_stencil_attachment
    }

    /// Render target size in pixels
    pub fn target_size(&self) -> UVec2 {
        self.target_size
    }

    /// The render target description captured at construction
    pub fn render_target(&self) -> &RenderTargetDesc {
        &self.target
    }

    /// Projection from target pixel space to normalized device coordinates
    pub fn orthographic_transform(&self) -> Mat4 {
        self.orthographic
    }

    /// The device context this pass encodes against
    pub fn context(&self) -> &Arc<dyn RenderContext> {
        &self.context
    }

    /// The finalized commands recorded so far, in draw order
    pub fn commands(&self) -> &[Command<'smp>] {
        &self.commands
    }

    // ===== PASS LABEL =====

    /// Forward a debug label for the pass to the backend
    ///
    /// An empty label is a no-op; "no label" and "explicitly empty label"
    /// are not distinguished.
    pub fn set_label(&mut self, label: &str) {
        if label.is_empty() {
            return;
        }
        self.encoder.set_label(label);
    }

    // ===== COMMAND FINALIZATION =====

    /// Validate a command and append it to the finalized sequence
    ///
    /// Returns false, leaving the sequence unmodified, if the command is
    /// structurally invalid or its scissor lies outside the render target.
    /// A command with a zero element or instance count is a successful
    /// no-op: it is not appended, but true is returned.
    pub fn add_command(&mut self, command: Command<'smp>) -> bool {
        if !command.is_valid() {
            crate::render_error!(SOURCE, "Attempted to add an invalid command to the render pass.");
            return false;
        }

        if let Some(scissor) = command.scissor {
            if !validation::validate_scissor(scissor, self.target_size) {
                return false;
            }
        }

        if command.element_count == 0 || command.instance_count == 0 {
            // A zero-fanout draw does nothing; dropping it is not an error.
            return true;
        }

        self.commands.push(command);
        true
    }

    /// Finalize the pending command
    ///
    /// Moves the pending command through [`RenderPass::add_command`] and
    /// unconditionally resets the pending state to a fresh default, so a
    /// rejected draw leaves nothing stale behind. Succeeds for the
    /// zero-fanout no-op case; fails only on structural or scissor
    /// invalidity. The error carries a fixed message; root cause goes to
    /// the diagnostic log.
    pub fn draw(&mut self) -> Result<()> {
        let command = std::mem::take(&mut self.pending);
        if self.add_command(command) {
            Ok(())
        } else {
            Err(Error::InvalidArgument("Failed to encode command".to_string()))
        }
    }

    // ===== PENDING-COMMAND SETTERS =====

    /// Set the pipeline of the pending command
    pub fn set_pipeline(&mut self, pipeline: Arc<dyn Pipeline>) {
        self.pending.pipeline = Some(pipeline);
    }

    /// Set the debug label of the pending command
    ///
    /// Dropped (not stored) when debug labels are disabled in the pass
    /// configuration.
    pub fn set_command_label(&mut self, label: &str) {
        if !self.config.debug_labels {
            return;
        }
        self.pending.label = Some(label.to_string());
    }

    /// Set the stencil reference value of the pending command
    pub fn set_stencil_reference(&mut self, value: u32) {
        self.pending.stencil_reference = value;
    }

    /// Set the base vertex offset of the pending command
    pub fn set_base_vertex(&mut self, value: u64) {
        self.pending.base_vertex = value;
    }

    /// Set the viewport of the pending command
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.pending.viewport = viewport;
    }

    /// Set the scissor rectangle of the pending command
    ///
    /// Containment in the render target is checked at finalization, not
    /// here.
    pub fn set_scissor(&mut self, scissor: Rect2D) {
        self.pending.scissor = Some(scissor);
    }

    /// Set the element count of the pending command
    pub fn set_element_count(&mut self, count: u32) {
        self.pending.element_count = count;
    }

    /// Set the instance count of the pending command
    pub fn set_instance_count(&mut self, count: u32) {
        self.pending.instance_count = count;
    }

    /// Bind a single vertex buffer to the pending command
    ///
    /// Validates eagerly; on failure the pending state is left unchanged.
    pub fn set_vertex_buffer(&mut self, vertex_buffer: BufferView) -> bool {
        self.set_vertex_buffers(vec![vertex_buffer])
    }

    /// Bind a set of vertex buffers to the pending command
    ///
    /// Validates eagerly (count within the vertex-buffer maximum, no empty
    /// views); on failure the pending vertex-buffer state is left
    /// unchanged.
    pub fn set_vertex_buffers(&mut self, vertex_buffers: Vec<BufferView>) -> bool {
        if !validation::validate_vertex_buffers(&vertex_buffers) {
            return false;
        }

        self.pending.vertex_buffer_count = vertex_buffers.len();
        for (dst, view) in self.pending.vertex_buffers.iter_mut().zip(vertex_buffers) {
            *dst = Some(view);
        }
        true
    }

    /// Bind packaged geometry: vertex buffer, index buffer, and element
    /// count in one call
    ///
    /// If the vertex-buffer assignment fails, neither the index buffer nor
    /// the element count is touched.
    pub fn set_vertex_geometry(&mut self, geometry: VertexGeometry) -> bool {
        let VertexGeometry { vertex_buffer, index_buffer, index_type, element_count } = geometry;

        if !self.set_vertex_buffers(vec![vertex_buffer]) {
            return false;
        }
        if !self.set_index_buffer(index_buffer, index_type) {
            return false;
        }
        self.set_element_count(element_count);

        true
    }

    /// Bind an index buffer to the pending command
    ///
    /// Validates eagerly; on failure the pending index state is left
    /// unchanged. With `IndexType::None` the buffer is ignored and may be
    /// `None`.
    pub fn set_index_buffer(
        &mut self,
        index_buffer: Option<BufferView>,
        index_type: IndexType,
    ) -> bool {
        if !validation::validate_index_buffer(index_buffer.as_ref(), index_type) {
            return false;
        }

        self.pending.index_buffer = index_buffer;
        self.pending.index_type = index_type;
        true
    }

    // ===== ENCODE =====

    /// Hand the finalized command sequence to the backend encoder
    ///
    /// Commands are translated strictly in recorded order. The sequence is
    /// not drained: calling this again re-encodes the same commands.
    pub fn encode_commands(&self) -> Result<()> {
        self.encoder.encode(self.context.as_ref(), &self.commands)
    }
}

// ResourceBinder: all four operations mutate only the pending command and
// never touch already-finalized commands.
impl<'smp> ResourceBinder<'smp> for RenderPass<'smp> {
    fn bind_buffer(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: ShaderUniformSlot,
        metadata: Option<&'static ShaderMetadata>,
        view: BufferView,
    ) -> bool {
        self.pending.bind_buffer(stage, binding_type, slot, metadata, view)
    }

    fn bind_texture(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: SampledImageSlot,
        metadata: Option<&'static ShaderMetadata>,
        texture: Arc<dyn Texture>,
        sampler: &'smp dyn Sampler,
    ) -> bool {
        self.pending.bind_texture(stage, binding_type, slot, metadata, texture, sampler)
    }

    fn bind_dynamic_buffer(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: ShaderUniformSlot,
        metadata: Box<ShaderMetadata>,
        view: BufferView,
    ) -> bool {
        self.pending.bind_dynamic_buffer(stage, binding_type, slot, metadata, view)
    }

    fn bind_dynamic_texture(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: SampledImageSlot,
        metadata: Box<ShaderMetadata>,
        texture: Arc<dyn Texture>,
        sampler: &'smp dyn Sampler,
    ) -> bool {
        self.pending.bind_dynamic_texture(stage, binding_type, slot, metadata, texture, sampler)
    }
}

#[cfg(test)]
#[path = "render_pass_tests.rs"]
mod tests;
