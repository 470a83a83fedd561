//! Unit tests for the mock backend
//!
//! Tests the mock types used by the recording-layer tests.

use super::*;
use crate::renderer::{Buffer, Command, PassEncoder, RenderContext, Texture, TextureFormat};

// ============================================================================
// MockBuffer Tests
// ============================================================================

#[test]
fn test_mock_buffer_creation() {
    let buffer = MockBuffer::new(1024, "test_buffer".to_string());
    assert_eq!(buffer.size, 1024);
    assert_eq!(buffer.name, "test_buffer");
}

#[test]
fn test_mock_buffer_update() {
    let buffer = MockBuffer::new(1024, "test_buffer".to_string());
    let data: Vec<u8> = bytemuck::cast_slice(&[1.0f32, 2.0, 3.0]).to_vec();

    let result = buffer.update(0, &data);
    assert!(result.is_ok());
}

#[test]
fn test_mock_view_covers_whole_buffer() {
    let view = mock_view(256);
    assert_eq!(view.offset, 0);
    assert_eq!(view.size, 256);
    assert!(!view.is_empty());

    let empty = mock_view(0);
    assert!(empty.is_empty());
}

// ============================================================================
// MockTexture Tests
// ============================================================================

#[test]
fn test_mock_texture_info() {
    let texture = MockTexture::new(512, 256, "albedo".to_string());

    let info = texture.info();
    assert_eq!(info.width, 512);
    assert_eq!(info.height, 256);
    assert_eq!(info.format, TextureFormat::R8G8B8A8_UNORM);
}

// ============================================================================
// MockContext Tests
// ============================================================================

#[test]
fn test_mock_context_backend_name() {
    let context = MockContext::new();
    assert_eq!(context.backend_name(), "mock");
}

#[test]
fn test_mock_encoder_records_commands() {
    let context = MockContext::new();
    let encoder = context.create_pass_encoder();

    let mut command = Command::default();
    command.element_count = 3;

    assert!(encoder.encode(&context, &[command]).is_ok());

    let encoded = context.encoded();
    assert_eq!(encoded.len(), 1);
    assert!(encoded[0].contains("elements=3"));
}

#[test]
fn test_mock_encoder_label_shared_with_context() {
    let context = MockContext::new();
    let mut encoder = context.create_pass_encoder();

    encoder.set_label("shadow pass");
    assert_eq!(context.label(), Some("shadow pass".to_string()));
}

#[test]
fn test_failing_context_fails_encode() {
    let context = MockContext::failing();
    let encoder = context.create_pass_encoder();

    assert!(encoder.encode(&context, &[]).is_err());
}
