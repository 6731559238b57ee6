/// Tests for GraphicsContext

use super::*;

use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{Extent2d, ImageUsage, MemoryProperties, TextureFormat};

#[test]
fn test_context_wires_registries_to_one_device() {
    let device = Arc::new(MockGraphicsDevice::new());
    let context = GraphicsContext::new(device.clone());

    context
        .attachments()
        .add_color_attachment(
            "Color",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    // The registry allocated through the shared device
    assert_eq!(device.created_images.lock().unwrap().len(), 1);
    assert_eq!(context.attachments().attachment_count(), 1);
    assert_eq!(context.render_passes().render_pass_count(), 0);
    assert_eq!(context.framebuffers().framebuffer_count(), 0);
}
