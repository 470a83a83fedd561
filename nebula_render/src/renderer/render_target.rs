//! Render target description consumed at RenderPass construction

use crate::renderer::TextureFormat;

/// Multisample count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCount {
    /// 1 sample (no multisampling)
    S1,
    /// 2 samples
    S2,
    /// 4 samples
    S4,
    /// 8 samples
    S8,
}

/// Load operation for an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOp {
    /// Load existing content
    Load,
    /// Clear the content
    Clear,
    /// Don't care about existing content
    DontCare,
}

/// Store operation for an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    /// Store the rendered content
    Store,
    /// Don't care about storing the content
    DontCare,
}

/// Descriptor for a single attachment of a render target
#[derive(Debug, Clone)]
pub struct AttachmentDesc {
    /// Pixel format
    pub format: TextureFormat,
    /// Load operation (what to do with existing content)
    pub load_op: LoadOp,
    /// Store operation (what to do with rendered content)
    pub store_op: StoreOp,
}

/// Description of the render target a pass records against
///
/// This is a read-only configuration snapshot: the pass captures sample
/// count, pixel format, attachment presence, and size at construction and
/// never re-reads the description afterwards. Attachment resources
/// themselves (textures, views) are owned by the caller.
#[derive(Debug, Clone)]
pub struct RenderTargetDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format of the color target
    pub format: TextureFormat,
    /// Number of samples per pixel
    pub sample_count: SampleCount,
    /// Optional depth attachment
    pub depth_attachment: Option<AttachmentDesc>,
    /// Optional stencil attachment
    pub stencil_attachment: Option<AttachmentDesc>,
}
