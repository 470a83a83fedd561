//! Mock backend for unit tests (no GPU required)
//!
//! This mock context and encoder allow testing RenderPass and command
//! recording without a real GPU or graphics backend.

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::renderer::{
    Buffer, BufferView, Command, PassEncoder, Pipeline, RenderContext, Sampler, Texture,
    TextureFormat, TextureInfo,
};

// ============================================================================
// Mock resources
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub name: String,
}

impl MockBuffer {
    pub fn new(size: u64, name: String) -> Self {
        Self { size, name }
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn update(&self, _offset: u64, _data: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Shorthand for a view over a fresh mock buffer of `size` bytes
pub fn mock_view(size: u64) -> BufferView {
    BufferView::whole(Arc::new(MockBuffer::new(size, format!("buffer_{}", size))))
}

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub name: String,
}

impl MockTexture {
    pub fn new(width: u32, height: u32, name: String) -> Self {
        Self {
            info: TextureInfo {
                width,
                height,
                format: TextureFormat::R8G8B8A8_UNORM,
            },
            name,
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

#[derive(Debug)]
pub struct MockSampler {
    pub name: String,
}

impl MockSampler {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Sampler for MockSampler {}

#[derive(Debug)]
pub struct MockPipeline {
    pub name: String,
}

impl MockPipeline {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl Pipeline for MockPipeline {}

// ============================================================================
// Mock encoder
// ============================================================================

/// Encoder that records one summary line per encoded command
pub struct MockPassEncoder {
    pub label: Arc<Mutex<Option<String>>>,
    pub encoded: Arc<Mutex<Vec<String>>>,
    pub fail_encode: bool,
}

impl PassEncoder for MockPassEncoder {
    fn set_label(&mut self, label: &str) {
        *self.label.lock().unwrap() = Some(label.to_string());
    }

    fn encode(&self, _context: &dyn RenderContext, commands: &[Command<'_>]) -> Result<()> {
        if self.fail_encode {
            return Err(Error::BackendError("mock encode failure".to_string()));
        }

        let mut encoded = self.encoded.lock().unwrap();
        for command in commands {
            encoded.push(format!(
                "draw elements={} instances={} vertex_buffers={} bindings={}",
                command.element_count,
                command.instance_count,
                command.vertex_buffer_count,
                command.bindings.len(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Mock context
// ============================================================================

/// Mock device context; encoders it creates share its recording state
pub struct MockContext {
    pub label: Arc<Mutex<Option<String>>>,
    pub encoded: Arc<Mutex<Vec<String>>>,
    pub fail_encode: bool,
}

impl MockContext {
    pub fn new() -> Self {
        Self {
            label: Arc::new(Mutex::new(None)),
            encoded: Arc::new(Mutex::new(Vec::new())),
            fail_encode: false,
        }
    }

    /// A context whose encoders fail every encode call
    pub fn failing() -> Self {
        Self {
            fail_encode: true,
            ..Self::new()
        }
    }

    /// Summary lines of every command encoded so far
    pub fn encoded(&self) -> Vec<String> {
        self.encoded.lock().unwrap().clone()
    }

    /// The pass label last forwarded to the backend, if any
    pub fn label(&self) -> Option<String> {
        self.label.lock().unwrap().clone()
    }
}

impl RenderContext for MockContext {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    fn create_pass_encoder(&self) -> Box<dyn PassEncoder> {
        Box::new(MockPassEncoder {
            label: Arc::clone(&self.label),
            encoded: Arc::clone(&self.encoded),
            fail_encode: self.fail_encode,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_backend_tests.rs"]
mod tests;
