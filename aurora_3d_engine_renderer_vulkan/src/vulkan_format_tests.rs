//! Unit tests for Vulkan conversion functions
//!
//! Tests pure conversion functions without requiring a GPU. Validates the
//! mapping between engine enums/bitflags and their Vulkan counterparts.

use super::*;

// ============================================================================
// FORMAT CONVERSION TESTS
// ============================================================================

#[test]
fn test_format_to_vk_color_formats() {
    assert_eq!(format_to_vk(TextureFormat::R8G8B8A8_SRGB), vk::Format::R8G8B8A8_SRGB);
    assert_eq!(format_to_vk(TextureFormat::R8G8B8A8_UNORM), vk::Format::R8G8B8A8_UNORM);
    assert_eq!(format_to_vk(TextureFormat::B8G8R8A8_SRGB), vk::Format::B8G8R8A8_SRGB);
    assert_eq!(format_to_vk(TextureFormat::B8G8R8A8_UNORM), vk::Format::B8G8R8A8_UNORM);
}

#[test]
fn test_format_to_vk_depth_formats() {
    assert_eq!(format_to_vk(TextureFormat::D16_UNORM), vk::Format::D16_UNORM);
    assert_eq!(format_to_vk(TextureFormat::D32_SFLOAT), vk::Format::D32_SFLOAT);
    assert_eq!(
        format_to_vk(TextureFormat::D24_UNORM_S8_UINT),
        vk::Format::D24_UNORM_S8_UINT
    );
}

// ============================================================================
// LAYOUT AND OP CONVERSION TESTS
// ============================================================================

#[test]
fn test_image_layout_to_vk() {
    assert_eq!(image_layout_to_vk(ImageLayout::Undefined), vk::ImageLayout::UNDEFINED);
    assert_eq!(image_layout_to_vk(ImageLayout::General), vk::ImageLayout::GENERAL);
    assert_eq!(
        image_layout_to_vk(ImageLayout::ColorAttachmentOptimal),
        vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL
    );
    assert_eq!(
        image_layout_to_vk(ImageLayout::DepthStencilAttachmentOptimal),
        vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL
    );
    assert_eq!(
        image_layout_to_vk(ImageLayout::ShaderReadOnlyOptimal),
        vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL
    );
    assert_eq!(
        image_layout_to_vk(ImageLayout::TransferSrcOptimal),
        vk::ImageLayout::TRANSFER_SRC_OPTIMAL
    );
    assert_eq!(
        image_layout_to_vk(ImageLayout::TransferDstOptimal),
        vk::ImageLayout::TRANSFER_DST_OPTIMAL
    );
}

#[test]
fn test_load_store_ops_to_vk() {
    assert_eq!(load_op_to_vk(AttachmentLoadOp::Load), vk::AttachmentLoadOp::LOAD);
    assert_eq!(load_op_to_vk(AttachmentLoadOp::Clear), vk::AttachmentLoadOp::CLEAR);
    assert_eq!(load_op_to_vk(AttachmentLoadOp::DontCare), vk::AttachmentLoadOp::DONT_CARE);
    assert_eq!(store_op_to_vk(AttachmentStoreOp::Store), vk::AttachmentStoreOp::STORE);
    assert_eq!(store_op_to_vk(AttachmentStoreOp::DontCare), vk::AttachmentStoreOp::DONT_CARE);
}

// ============================================================================
// BITFLAG CONVERSION TESTS
// ============================================================================

#[test]
fn test_pipeline_stages_to_vk_combines_flags() {
    assert_eq!(
        pipeline_stages_to_vk(PipelineStages::TOP_OF_PIPE),
        vk::PipelineStageFlags::TOP_OF_PIPE
    );
    assert_eq!(
        pipeline_stages_to_vk(PipelineStages::TRANSFER | PipelineStages::BOTTOM_OF_PIPE),
        vk::PipelineStageFlags::TRANSFER | vk::PipelineStageFlags::BOTTOM_OF_PIPE
    );
    assert_eq!(
        pipeline_stages_to_vk(PipelineStages::empty()),
        vk::PipelineStageFlags::empty()
    );
}

#[test]
fn test_access_to_vk_combines_flags() {
    assert_eq!(access_to_vk(Access::TRANSFER_WRITE), vk::AccessFlags::TRANSFER_WRITE);
    assert_eq!(
        access_to_vk(Access::COLOR_ATTACHMENT_READ | Access::COLOR_ATTACHMENT_WRITE),
        vk::AccessFlags::COLOR_ATTACHMENT_READ | vk::AccessFlags::COLOR_ATTACHMENT_WRITE
    );
    // Empty access is valid in release/acquire barrier halves
    assert_eq!(access_to_vk(Access::empty()), vk::AccessFlags::empty());
}

#[test]
fn test_aspect_to_vk() {
    assert_eq!(aspect_to_vk(ImageAspect::COLOR), vk::ImageAspectFlags::COLOR);
    assert_eq!(
        aspect_to_vk(ImageAspect::DEPTH | ImageAspect::STENCIL),
        vk::ImageAspectFlags::DEPTH | vk::ImageAspectFlags::STENCIL
    );
}

#[test]
fn test_usage_flags_to_vk() {
    assert_eq!(
        image_usage_to_vk(ImageUsage::TRANSFER_DST | ImageUsage::SAMPLED),
        vk::ImageUsageFlags::TRANSFER_DST | vk::ImageUsageFlags::SAMPLED
    );
    assert_eq!(
        buffer_usage_to_vk(BufferUsage::TRANSFER_SRC | BufferUsage::UNIFORM),
        vk::BufferUsageFlags::TRANSFER_SRC | vk::BufferUsageFlags::UNIFORM_BUFFER
    );
}

// ============================================================================
// SENTINEL TESTS
// ============================================================================

#[test]
fn test_external_subpass_index_maps_to_vk_sentinel() {
    assert_eq!(subpass_index_to_vk(EXTERNAL_SUBPASS_INDEX), vk::SUBPASS_EXTERNAL);
    assert_eq!(subpass_index_to_vk(0), 0);
    assert_eq!(subpass_index_to_vk(3), 3);
}
