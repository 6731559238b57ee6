//! Integration tests for the resource registries with a real Vulkan backend
//!
//! These tests require a GPU and are marked with #[ignore].
//! Run with: cargo test --test engine_integration_tests -- --ignored


use aurora_3d_engine::aurora3d::asset::{
    AssetLoader, DecodedImage, LoaderConfig, PixelDecoder, TextureSettings,
};
use aurora_3d_engine::aurora3d::device::{
    Access, AttachmentLoadOp, AttachmentStoreOp, Extent2d, ImageLayout, ImageUsage,
    MemoryProperties, PipelineBindPoint, PipelineStages, TextureFormat,
};
use aurora_3d_engine::aurora3d::render::{RenderPassBuilder, EXTERNAL_SUBPASS};
use aurora_3d_engine::aurora3d::{Error, GraphicsContext, Result};
use gpu_test_utils::get_test_device;
use serial_test::serial;
use std::path::Path;
use std::sync::Arc;

/// Decoder producing a solid 8x8 RGBA image, so tests need no asset files
struct SolidDecoder;

impl PixelDecoder for SolidDecoder {
    fn decode(&self, _path: &Path) -> Result<DecodedImage> {
        Ok(DecodedImage {
            extent: Extent2d::new(8, 8),
            pixels: vec![0x7F; 8 * 8 * 4],
        })
    }
}

// ============================================================================
// FULL LIFECYCLE TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
#[serial]
fn test_integration_attachment_to_framebuffer_lifecycle() {
    let device = get_test_device();
    let context = GraphicsContext::new(device);
    let extent = Extent2d::new(320, 240);

    context
        .attachments()
        .add_color_attachment(
            "LifecycleColor",
            extent,
            TextureFormat::B8G8R8A8_UNORM,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    let color = context.attachments().attachment("LifecycleColor").unwrap();

    let mut builder = RenderPassBuilder::new("Lifecycle");
    builder
        .add_color_attachment(
            "LifecycleColor",
            &color,
            AttachmentLoadOp::Clear,
            AttachmentStoreOp::Store,
            ImageLayout::Undefined,
            ImageLayout::ColorAttachmentOptimal,
        )
        .add_subpass("Main", PipelineBindPoint::Graphics, &["LifecycleColor"])
        .add_dependency(
            EXTERNAL_SUBPASS,
            "Main",
            PipelineStages::COLOR_ATTACHMENT_OUTPUT,
            PipelineStages::COLOR_ATTACHMENT_OUTPUT,
            Access::empty(),
            Access::COLOR_ATTACHMENT_WRITE,
        );

    context.render_passes().create_render_pass(builder).unwrap();

    let framebuffer = context
        .framebuffers()
        .add_framebuffer("LifecycleFb", "Lifecycle", &["LifecycleColor"])
        .unwrap();
    assert_eq!(framebuffer.extent(), extent);

    // Attachment and pass are pinned while the framebuffer exists
    assert_eq!(context.attachments().ref_count("LifecycleColor").unwrap(), 1);
    assert!(matches!(
        context.attachments().delete_attachment("LifecycleColor"),
        Err(Error::StillReferenced(_))
    ));

    context.framebuffers().delete_framebuffer("LifecycleFb").unwrap();
    context.render_passes().delete_render_pass("Lifecycle").unwrap();
    context.attachments().delete_attachment("LifecycleColor").unwrap();
}

#[test]
#[ignore] // Requires GPU
#[serial]
fn test_integration_async_texture_upload() {
    let device = get_test_device();
    let loader =
        AssetLoader::with_decoder(device.clone(), Arc::new(SolidDecoder), LoaderConfig::default())
            .unwrap();

    let handle = loader.load_texture_2d("checker.png", TextureSettings::default());
    let texture = handle.wait().unwrap();

    assert_eq!(texture.extent(), Extent2d::new(8, 8));
    assert_eq!(texture.info().size.z, 8.0);
    device.wait_idle().unwrap();
}

#[test]
#[ignore] // Requires GPU
#[serial]
fn test_integration_parallel_uploads() {
    let device = get_test_device();
    let loader = AssetLoader::with_decoder(
        device.clone(),
        Arc::new(SolidDecoder),
        LoaderConfig {
            worker_threads: 2,
            ..LoaderConfig::default()
        },
    )
    .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| loader.load_texture_2d(format!("tex_{}.png", i), TextureSettings::default()))
        .collect();

    for handle in handles {
        let texture = handle.wait().unwrap();
        assert_eq!(texture.extent(), Extent2d::new(8, 8));
    }
    device.wait_idle().unwrap();
}
