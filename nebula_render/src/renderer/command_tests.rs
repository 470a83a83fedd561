//! Unit tests for Command
//!
//! Tests the structural-validity invariant, the bind table, and the
//! defaults the pending-command cycle relies on.

use super::*;
use crate::renderer::mock_backend::{mock_view, MockPipeline, MockSampler, MockTexture};
use crate::renderer::{Pipeline, Texture};
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn mock_pipeline() -> Arc<dyn Pipeline> {
    Arc::new(MockPipeline::new("pipeline".to_string()))
}

fn uniform_slot(binding: u32) -> ShaderUniformSlot {
    ShaderUniformSlot { name: "frame_info", binding }
}

fn image_slot(texture_index: u32) -> SampledImageSlot {
    SampledImageSlot {
        name: "base_color",
        texture_index,
        sampler_index: texture_index,
    }
}

// ============================================================================
// Default Tests
// ============================================================================

#[test]
fn test_default_command_state() {
    let command = Command::default();

    assert!(command.pipeline.is_none());
    assert_eq!(command.vertex_buffer_count, 0);
    assert!(command.index_buffer.is_none());
    assert_eq!(command.index_type, IndexType::None);
    assert!(command.bindings.is_empty());
    assert_eq!(command.element_count, 0);
    assert_eq!(command.instance_count, 1);
    assert!(command.scissor.is_none());
    assert_eq!(command.stencil_reference, 0);
    assert_eq!(command.base_vertex, 0);
    assert!(command.label.is_none());
}

// ============================================================================
// Validity Tests
// ============================================================================

#[test]
fn test_command_without_pipeline_is_invalid() {
    let command = Command::default();
    assert!(!command.is_valid());
}

#[test]
fn test_command_with_pipeline_is_valid() {
    let mut command = Command::default();
    command.pipeline = Some(mock_pipeline());
    assert!(command.is_valid());
}

#[test]
fn test_unknown_index_type_is_invalid() {
    let mut command = Command::default();
    command.pipeline = Some(mock_pipeline());
    command.index_type = IndexType::Unknown;
    assert!(!command.is_valid());

    // A perfectly good buffer does not rescue an unknown index type
    command.index_buffer = Some(mock_view(256));
    assert!(!command.is_valid());
}

#[test]
fn test_indexed_draw_requires_buffer() {
    let mut command = Command::default();
    command.pipeline = Some(mock_pipeline());
    command.index_type = IndexType::U16;
    assert!(!command.is_valid());

    command.index_buffer = Some(mock_view(0));
    assert!(!command.is_valid());

    command.index_buffer = Some(mock_view(256));
    assert!(command.is_valid());

    command.index_type = IndexType::U32;
    assert!(command.is_valid());
}

#[test]
fn test_non_indexed_draw_ignores_buffer() {
    let mut command = Command::default();
    command.pipeline = Some(mock_pipeline());
    command.index_type = IndexType::None;
    command.index_buffer = Some(mock_view(256));
    assert!(command.is_valid());
}

#[test]
fn test_vertex_buffer_count_over_maximum_is_invalid() {
    let mut command = Command::default();
    command.pipeline = Some(mock_pipeline());
    command.vertex_buffer_count = MAX_VERTEX_BUFFERS + 1;
    assert!(!command.is_valid());

    command.vertex_buffer_count = MAX_VERTEX_BUFFERS;
    assert!(command.is_valid());
}

// ============================================================================
// Bind Table Tests
// ============================================================================

#[test]
fn test_bind_buffer_uniform() {
    let mut command = Command::default();

    let bound = command.bind_buffer(
        ShaderStage::Vertex,
        BindingType::UniformBuffer,
        uniform_slot(0),
        None,
        mock_view(64),
    );

    assert!(bound);
    assert_eq!(command.bindings.len(), 1);

    let key = BindingKey { stage: ShaderStage::Vertex, binding: 0 };
    match command.bindings.get(&key) {
        Some(BoundResource::Buffer(buffer)) => {
            assert_eq!(buffer.slot.binding, 0);
            assert_eq!(buffer.binding_type, BindingType::UniformBuffer);
            assert_eq!(buffer.view.size, 64);
            assert!(matches!(buffer.metadata, BindingMetadata::None));
        }
        _ => panic!("expected a buffer binding"),
    }
}

#[test]
fn test_bind_buffer_rejects_empty_view() {
    let mut command = Command::default();

    let bound = command.bind_buffer(
        ShaderStage::Vertex,
        BindingType::UniformBuffer,
        uniform_slot(0),
        None,
        mock_view(0),
    );

    assert!(!bound);
    assert!(command.bindings.is_empty());
}

#[test]
fn test_bind_buffer_rejects_image_type() {
    let mut command = Command::default();

    let bound = command.bind_buffer(
        ShaderStage::Fragment,
        BindingType::CombinedImageSampler,
        uniform_slot(1),
        None,
        mock_view(64),
    );

    assert!(!bound);
    assert!(command.bindings.is_empty());
}

#[test]
fn test_bind_texture() {
    let sampler = MockSampler::new("linear".to_string());
    let mut command = Command::default();
    let texture: Arc<dyn Texture> = Arc::new(MockTexture::new(256, 256, "albedo".to_string()));

    let bound = command.bind_texture(
        ShaderStage::Fragment,
        BindingType::CombinedImageSampler,
        image_slot(2),
        None,
        texture,
        &sampler,
    );

    assert!(bound);

    let key = BindingKey { stage: ShaderStage::Fragment, binding: 2 };
    match command.bindings.get(&key) {
        Some(BoundResource::Texture(image)) => {
            assert_eq!(image.slot.texture_index, 2);
            assert_eq!(image.texture.info().width, 256);
        }
        _ => panic!("expected a texture binding"),
    }
}

#[test]
fn test_bind_texture_rejects_buffer_type() {
    let sampler = MockSampler::new("linear".to_string());
    let mut command = Command::default();
    let texture: Arc<dyn Texture> = Arc::new(MockTexture::new(16, 16, "albedo".to_string()));

    let bound = command.bind_texture(
        ShaderStage::Fragment,
        BindingType::StorageBuffer,
        image_slot(0),
        None,
        texture,
        &sampler,
    );

    assert!(!bound);
    assert!(command.bindings.is_empty());
}

#[test]
fn test_rebinding_slot_overwrites() {
    let mut command = Command::default();

    assert!(command.bind_buffer(
        ShaderStage::Vertex,
        BindingType::UniformBuffer,
        uniform_slot(3),
        None,
        mock_view(64),
    ));
    assert!(command.bind_buffer(
        ShaderStage::Vertex,
        BindingType::UniformBuffer,
        uniform_slot(3),
        None,
        mock_view(128),
    ));

    assert_eq!(command.bindings.len(), 1);

    let key = BindingKey { stage: ShaderStage::Vertex, binding: 3 };
    match command.bindings.get(&key) {
        Some(BoundResource::Buffer(buffer)) => assert_eq!(buffer.view.size, 128),
        _ => panic!("expected a buffer binding"),
    }
}

#[test]
fn test_same_binding_different_stages_coexist() {
    let mut command = Command::default();

    assert!(command.bind_buffer(
        ShaderStage::Vertex,
        BindingType::UniformBuffer,
        uniform_slot(0),
        None,
        mock_view(64),
    ));
    assert!(command.bind_buffer(
        ShaderStage::Fragment,
        BindingType::UniformBuffer,
        uniform_slot(0),
        None,
        mock_view(64),
    ));

    assert_eq!(command.bindings.len(), 2);
}

#[test]
fn test_bind_dynamic_buffer_owns_metadata() {
    let mut command = Command::default();
    let metadata = Box::new(ShaderMetadata {
        name: "instance_data".to_string(),
        members: vec![ShaderStructMember {
            name: "model".to_string(),
            offset: 0,
            byte_size: 64,
        }],
    });

    let bound = command.bind_dynamic_buffer(
        ShaderStage::Vertex,
        BindingType::StorageBuffer,
        uniform_slot(4),
        metadata,
        mock_view(1024),
    );

    assert!(bound);

    let key = BindingKey { stage: ShaderStage::Vertex, binding: 4 };
    match command.bindings.get(&key) {
        Some(BoundResource::Buffer(buffer)) => match &buffer.metadata {
            BindingMetadata::Dynamic(owned) => {
                assert_eq!(owned.name, "instance_data");
                assert_eq!(owned.members.len(), 1);
            }
            _ => panic!("expected dynamic metadata"),
        },
        _ => panic!("expected a buffer binding"),
    }
}

#[test]
fn test_bind_dynamic_texture() {
    let sampler = MockSampler::new("nearest".to_string());
    let mut command = Command::default();
    let texture: Arc<dyn Texture> = Arc::new(MockTexture::new(64, 64, "noise".to_string()));
    let metadata = Box::new(ShaderMetadata {
        name: "noise_texture".to_string(),
        members: Vec::new(),
    });

    let bound = command.bind_dynamic_texture(
        ShaderStage::Fragment,
        BindingType::CombinedImageSampler,
        image_slot(5),
        metadata,
        texture,
        &sampler,
    );

    assert!(bound);
    assert_eq!(command.bindings.len(), 1);
}

// ============================================================================
// Misc Tests
// ============================================================================

#[test]
fn test_command_clone_preserves_state() {
    let mut command = Command::default();
    command.pipeline = Some(mock_pipeline());
    command.element_count = 6;
    assert!(command.bind_buffer(
        ShaderStage::Vertex,
        BindingType::UniformBuffer,
        uniform_slot(0),
        None,
        mock_view(64),
    ));

    let cloned = command.clone();
    assert!(cloned.is_valid());
    assert_eq!(cloned.element_count, 6);
    assert_eq!(cloned.bindings.len(), 1);
}

#[test]
fn test_index_type_size_bytes() {
    assert_eq!(IndexType::U16.size_bytes(), 2);
    assert_eq!(IndexType::U32.size_bytes(), 4);
    assert_eq!(IndexType::None.size_bytes(), 0);
    assert_eq!(IndexType::Unknown.size_bytes(), 0);
}

#[test]
fn test_vertex_buffer_views_respects_count() {
    let mut command = Command::default();
    command.vertex_buffers[0] = Some(mock_view(64));
    command.vertex_buffers[1] = Some(mock_view(64));
    command.vertex_buffer_count = 1;

    assert_eq!(command.vertex_buffer_views().count(), 1);
}

#[test]
fn test_viewport_default_depth_range() {
    let viewport = Viewport::default();
    assert_eq!(viewport.min_depth, 0.0);
    assert_eq!(viewport.max_depth, 1.0);
}
