//! Command - one draw call's complete, self-contained state
//!
//! A [`Command`] carries everything a backend needs to encode a single draw:
//! pipeline, vertex/index buffers, resource bindings, counts, and
//! fixed-function state. Individual field mutation performs no validation;
//! consistency is checked when the command is finalized into a
//! [`RenderPass`](crate::renderer::RenderPass).

use std::sync::Arc;
use rustc_hash::FxHashMap;

use crate::renderer::{BufferView, Pipeline, Sampler, Texture};

/// Maximum number of vertex buffers a single command may bind
pub const MAX_VERTEX_BUFFERS: usize = 16;

// ============================================================================
// Shader stages, slots, and binding metadata
// ============================================================================

/// Shader stage a resource is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
    /// Compute shader
    Compute,
}

/// Type of resource bound at a given slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingType {
    /// Uniform buffer (read-only structured data)
    UniformBuffer,
    /// Storage buffer (read/write structured data)
    StorageBuffer,
    /// Combined image sampler (texture + sampler in one binding)
    CombinedImageSampler,
}

/// Slot a shader exposes for a uniform-style buffer binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderUniformSlot {
    /// Name of the uniform in the shader source
    pub name: &'static str,
    /// Binding number (corresponds to `layout(binding = N)` in GLSL)
    pub binding: u32,
}

/// Slot a shader exposes for a sampled-image binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledImageSlot {
    /// Name of the sampled image in the shader source
    pub name: &'static str,
    /// Binding number of the texture
    pub texture_index: u32,
    /// Binding number of the sampler
    pub sampler_index: u32,
}

/// One member of a shader struct, as described by reflection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderStructMember {
    /// Member name in the shader source
    pub name: String,
    /// Offset in bytes from the start of the struct
    pub offset: u32,
    /// Size in bytes
    pub byte_size: u32,
}

/// Reflection-derived description of a bound resource's shape
///
/// Normally produced ahead of time by shader reflection and passed by
/// `'static` reference; when reflection data is unavailable at bind time,
/// callers supply an owned copy through the dynamic bind operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderMetadata {
    /// Name of the resource in the shader source
    pub name: String,
    /// Struct members (empty for opaque resources such as images)
    pub members: Vec<ShaderStructMember>,
}

/// How a binding's metadata is owned
#[derive(Debug, Clone)]
pub enum BindingMetadata {
    /// No metadata supplied
    None,
    /// Reflection table compiled into the program
    Static(&'static ShaderMetadata),
    /// Caller-supplied metadata, owned by the command
    Dynamic(Box<ShaderMetadata>),
}

// ============================================================================
// Bound resources
// ============================================================================

/// Identity of a binding: stage plus binding index
///
/// Rebinding an occupied key overwrites the previous resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingKey {
    /// Stage the resource is visible to
    pub stage: ShaderStage,
    /// Binding index within the stage
    pub binding: u32,
}

/// A buffer bound to a uniform-style slot
#[derive(Clone)]
pub struct BoundBuffer {
    /// The slot the buffer is bound to
    pub slot: ShaderUniformSlot,
    /// Kind of buffer binding
    pub binding_type: BindingType,
    /// Shape metadata, if any
    pub metadata: BindingMetadata,
    /// The bound buffer region
    pub view: BufferView,
}

/// A texture and sampler bound to a sampled-image slot
///
/// The texture is shared and kept alive until encode; the sampler is
/// borrowed for `'smp` and must outlive the pass.
#[derive(Clone)]
pub struct BoundTexture<'smp> {
    /// The slot the image is bound to
    pub slot: SampledImageSlot,
    /// Kind of image binding
    pub binding_type: BindingType,
    /// Shape metadata, if any
    pub metadata: BindingMetadata,
    /// The bound texture
    pub texture: Arc<dyn Texture>,
    /// The bound sampler
    pub sampler: &'smp dyn Sampler,
}

/// A resource bound into a command
#[derive(Clone)]
pub enum BoundResource<'smp> {
    /// Buffer binding
    Buffer(BoundBuffer),
    /// Texture + sampler binding
    Texture(BoundTexture<'smp>),
}

/// Binding table of a command, keyed by slot identity
pub type BindingMap<'smp> = FxHashMap<BindingKey, BoundResource<'smp>>;

// ============================================================================
// Draw state
// ============================================================================

/// Index buffer element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// Non-indexed draw, no index buffer required
    None,
    /// 16-bit indices (max 65535 vertices)
    U16,
    /// 32-bit indices (max ~4 billion vertices)
    U32,
    /// Unset/unrecognized index type, never valid
    Unknown,
}

impl IndexType {
    /// Size in bytes of one index element
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
            IndexType::None | IndexType::Unknown => 0,
        }
    }
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// 2D rectangle in integer pixel space, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Packaged vertex-buffer description for the combined setter
///
/// Bundles the vertex buffer, the optional index buffer, and the element
/// count that together describe one piece of geometry.
#[derive(Clone)]
pub struct VertexGeometry {
    /// The vertex buffer region
    pub vertex_buffer: BufferView,
    /// The index buffer region, if indexed
    pub index_buffer: Option<BufferView>,
    /// Element type of the index buffer
    pub index_type: IndexType,
    /// Number of elements to draw (indices if indexed, vertices otherwise)
    pub element_count: u32,
}

// ============================================================================
// Command
// ============================================================================

/// One draw call's complete state
///
/// A plain value: fields are public and no validation happens on mutation.
/// [`Command::is_valid`] reports structural consistency;
/// [`RenderPass::add_command`](crate::renderer::RenderPass::add_command)
/// enforces it at finalization.
#[derive(Clone)]
pub struct Command<'smp> {
    /// The compiled pipeline this draw uses (required for validity)
    pub pipeline: Option<Arc<dyn Pipeline>>,

    /// Bound vertex buffers; only the first `vertex_buffer_count` entries
    /// are meaningful
    pub vertex_buffers: [Option<BufferView>; MAX_VERTEX_BUFFERS],

    /// Number of bound vertex buffers
    pub vertex_buffer_count: usize,

    /// The index buffer, if any
    pub index_buffer: Option<BufferView>,

    /// Element type of the index buffer; `IndexType::None` means a
    /// non-indexed draw
    pub index_type: IndexType,

    /// Resource bindings keyed by (stage, binding index)
    pub bindings: BindingMap<'smp>,

    /// Number of elements (indices or vertices) to draw
    pub element_count: u32,

    /// Number of instances to draw
    pub instance_count: u32,

    /// Viewport for the draw
    pub viewport: Viewport,

    /// Optional scissor rectangle, validated against the render target at
    /// finalization
    pub scissor: Option<Rect2D>,

    /// Stencil reference value
    pub stencil_reference: u32,

    /// Value added to the vertex index before indexing into the vertex
    /// buffer
    pub base_vertex: u64,

    /// Debug label, diagnostic only, never affects behavior
    pub label: Option<String>,
}

impl<'smp> Default for Command<'smp> {
    fn default() -> Self {
        Self {
            pipeline: None,
            vertex_buffers: Default::default(),
            vertex_buffer_count: 0,
            index_buffer: None,
            index_type: IndexType::None,
            bindings: BindingMap::default(),
            element_count: 0,
            instance_count: 1,
            viewport: Viewport::default(),
            scissor: None,
            stencil_reference: 0,
            base_vertex: 0,
            label: None,
        }
    }
}

impl<'smp> Command<'smp> {
    /// Returns true if the command is structurally consistent
    ///
    /// A command is valid iff it has a pipeline, its index state is
    /// coherent (`Unknown` never, `U16`/`U32` only with a non-empty
    /// buffer), and its vertex-buffer count is within
    /// [`MAX_VERTEX_BUFFERS`]. Pure; no side effects.
    pub fn is_valid(&self) -> bool {
        if self.pipeline.is_none() {
            return false;
        }

        if self.vertex_buffer_count > MAX_VERTEX_BUFFERS {
            return false;
        }

        match self.index_type {
            IndexType::Unknown => false,
            IndexType::None => true,
            IndexType::U16 | IndexType::U32 => self
                .index_buffer
                .as_ref()
                .is_some_and(|view| !view.is_empty()),
        }
    }

    /// Attach a buffer region to a uniform-style slot
    ///
    /// Fails (returning false, mutating nothing) if the view is empty or
    /// `binding_type` is not a buffer binding. Rebinding an occupied slot
    /// overwrites it.
    pub fn bind_buffer(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: ShaderUniformSlot,
        metadata: Option<&'static ShaderMetadata>,
        view: BufferView,
    ) -> bool {
        self.do_bind_buffer(
            stage,
            binding_type,
            slot,
            metadata.map_or(BindingMetadata::None, BindingMetadata::Static),
            view,
        )
    }

    /// Attach a texture and sampler to a sampled-image slot
    ///
    /// Fails (returning false, mutating nothing) if `binding_type` is not
    /// an image binding. The texture's shared ownership is extended until
    /// encode; the sampler is borrowed.
    pub fn bind_texture(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: SampledImageSlot,
        metadata: Option<&'static ShaderMetadata>,
        texture: Arc<dyn Texture>,
        sampler: &'smp dyn Sampler,
    ) -> bool {
        self.do_bind_texture(
            stage,
            binding_type,
            slot,
            metadata.map_or(BindingMetadata::None, BindingMetadata::Static),
            texture,
            sampler,
        )
    }

    /// [`Command::bind_buffer`] with caller-supplied metadata, for use when
    /// static shader reflection is unavailable; ownership of the metadata
    /// transfers to the command
    pub fn bind_dynamic_buffer(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: ShaderUniformSlot,
        metadata: Box<ShaderMetadata>,
        view: BufferView,
    ) -> bool {
        self.do_bind_buffer(stage, binding_type, slot, BindingMetadata::Dynamic(metadata), view)
    }

    /// [`Command::bind_texture`] with caller-supplied metadata; ownership
    /// of the metadata transfers to the command
    pub fn bind_dynamic_texture(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: SampledImageSlot,
        metadata: Box<ShaderMetadata>,
        texture: Arc<dyn Texture>,
        sampler: &'smp dyn Sampler,
    ) -> bool {
        self.do_bind_texture(
            stage,
            binding_type,
            slot,
            BindingMetadata::Dynamic(metadata),
            texture,
            sampler,
        )
    }

    fn do_bind_buffer(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: ShaderUniformSlot,
        metadata: BindingMetadata,
        view: BufferView,
    ) -> bool {
        if view.is_empty() {
            return false;
        }
        match binding_type {
            BindingType::UniformBuffer | BindingType::StorageBuffer => {}
            BindingType::CombinedImageSampler => return false,
        }

        self.bindings.insert(
            BindingKey { stage, binding: slot.binding },
            BoundResource::Buffer(BoundBuffer { slot, binding_type, metadata, view }),
        );
        true
    }

    fn do_bind_texture(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: SampledImageSlot,
        metadata: BindingMetadata,
        texture: Arc<dyn Texture>,
        sampler: &'smp dyn Sampler,
    ) -> bool {
        match binding_type {
            BindingType::CombinedImageSampler => {}
            BindingType::UniformBuffer | BindingType::StorageBuffer => return false,
        }

        self.bindings.insert(
            BindingKey { stage, binding: slot.texture_index },
            BoundResource::Texture(BoundTexture { slot, binding_type, metadata, texture, sampler }),
        );
        true
    }

    /// The vertex-buffer views in binding order
    pub fn vertex_buffer_views(&self) -> impl Iterator<Item = &BufferView> {
        let count = self.vertex_buffer_count.min(MAX_VERTEX_BUFFERS);
        self.vertex_buffers[..count].iter().filter_map(|view| view.as_ref())
    }
}

// ============================================================================
// ResourceBinder capability
// ============================================================================

/// Operation set for attaching resources to shader slots
///
/// Implemented by [`RenderPass`](crate::renderer::RenderPass), where the
/// operations mutate only the pending command. Every operation returns a
/// success flag and leaves state untouched on failure; structurally
/// meaningless slot/type combinations are rejected by the underlying
/// bind table.
pub trait ResourceBinder<'smp> {
    /// Attach a buffer region to a uniform-style slot of a shader stage
    fn bind_buffer(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: ShaderUniformSlot,
        metadata: Option<&'static ShaderMetadata>,
        view: BufferView,
    ) -> bool;

    /// Attach a texture and sampler to a sampled-image slot of a shader
    /// stage
    fn bind_texture(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: SampledImageSlot,
        metadata: Option<&'static ShaderMetadata>,
        texture: Arc<dyn Texture>,
        sampler: &'smp dyn Sampler,
    ) -> bool;

    /// [`ResourceBinder::bind_buffer`] with owned metadata, for use when
    /// static reflection is unavailable at bind time
    fn bind_dynamic_buffer(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: ShaderUniformSlot,
        metadata: Box<ShaderMetadata>,
        view: BufferView,
    ) -> bool;

    /// [`ResourceBinder::bind_texture`] with owned metadata
    fn bind_dynamic_texture(
        &mut self,
        stage: ShaderStage,
        binding_type: BindingType,
        slot: SampledImageSlot,
        metadata: Box<ShaderMetadata>,
        texture: Arc<dyn Texture>,
        sampler: &'smp dyn Sampler,
    ) -> bool;
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
