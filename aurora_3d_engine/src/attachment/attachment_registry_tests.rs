/// Tests for AttachmentRegistry
///
/// These tests validate attachment creation, lookup, reference counting,
/// deletion guards, and concurrent access.

use super::*;

use std::sync::Arc;
use std::thread;

use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;

fn registry() -> (Arc<MockGraphicsDevice>, AttachmentRegistry) {
    let device = Arc::new(MockGraphicsDevice::new());
    let registry = AttachmentRegistry::new(device.clone());
    (device, registry)
}

// ============================================================================
// Tests: Creation
// ============================================================================

#[test]
fn test_add_color_attachment() {
    let (device, registry) = registry();
    registry
        .add_color_attachment(
            "color",
            Extent2d::new(800, 600),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::SAMPLED,
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    assert_eq!(registry.attachment_count(), 1);
    assert_eq!(registry.ref_count("color").unwrap(), 0);

    let created = device.created_images.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert!(created[0].usage.contains(ImageUsage::COLOR_ATTACHMENT));
    assert!(created[0].usage.contains(ImageUsage::SAMPLED));
    assert_eq!(created[0].aspect, ImageAspect::COLOR);
}

#[test]
fn test_add_depth_attachment() {
    let (device, registry) = registry();
    registry
        .add_depth_attachment(
            "depth",
            Extent2d::new(800, 600),
            TextureFormat::D32_SFLOAT,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    let created = device.created_images.lock().unwrap();
    assert!(created[0].usage.contains(ImageUsage::DEPTH_STENCIL_ATTACHMENT));
    assert_eq!(created[0].aspect, ImageAspect::DEPTH);
}

#[test]
fn test_add_depth_attachment_with_stencil_aspect() {
    let (device, registry) = registry();
    registry
        .add_depth_attachment_with_aspect(
            "depth_stencil",
            Extent2d::new(800, 600),
            TextureFormat::D24_UNORM_S8_UINT,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
            ImageAspect::STENCIL,
        )
        .unwrap();

    let created = device.created_images.lock().unwrap();
    assert_eq!(created[0].aspect, ImageAspect::DEPTH | ImageAspect::STENCIL);
}

#[test]
fn test_add_attachment_duplicate_name_fails() {
    let (_, registry) = registry();
    registry
        .add_color_attachment(
            "color",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_UNORM,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    let result = registry.add_color_attachment(
        "color",
        Extent2d::new(128, 128),
        TextureFormat::R8G8B8A8_UNORM,
        ImageUsage::empty(),
        MemoryProperties::DEVICE_LOCAL,
    );
    assert!(matches!(result, Err(crate::error::Error::DuplicateName(_))));
    assert_eq!(registry.attachment_count(), 1);
}

// ============================================================================
// Tests: Lookup
// ============================================================================

#[test]
fn test_attachment_found() {
    let (_, registry) = registry();
    registry
        .add_color_attachment(
            "color",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    let attachment = registry.attachment("color").unwrap();
    assert_eq!(attachment.name(), "color");
    assert_eq!(attachment.extent(), Extent2d::new(64, 64));
    assert_eq!(attachment.format(), TextureFormat::R8G8B8A8_SRGB);
}

#[test]
fn test_attachment_not_found() {
    let (_, registry) = registry();
    let result = registry.attachment("nonexistent");
    assert!(matches!(result, Err(crate::error::Error::NotFound(_))));
}

#[test]
fn test_attachment_handle_outlives_deletion() {
    let (_, registry) = registry();
    registry
        .add_color_attachment(
            "color",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    let attachment = registry.attachment("color").unwrap();
    registry.delete_attachment("color").unwrap();

    // Outstanding handle still valid after the name is gone
    assert_eq!(attachment.name(), "color");
    assert!(registry.attachment("color").is_err());
}

// ============================================================================
// Tests: Deletion and ref counting
// ============================================================================

#[test]
fn test_delete_attachment_not_found() {
    let (_, registry) = registry();
    let result = registry.delete_attachment("nonexistent");
    assert!(matches!(result, Err(crate::error::Error::NotFound(_))));
}

#[test]
fn test_delete_attachment_while_referenced_fails() {
    let (_, registry) = registry();
    registry
        .add_color_attachment(
            "color",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    registry.retain_all(&["color"]).unwrap();
    let result = registry.delete_attachment("color");
    assert!(matches!(result, Err(crate::error::Error::StillReferenced(_))));

    registry.release_all(&["color"]);
    registry.delete_attachment("color").unwrap();
    assert_eq!(registry.attachment_count(), 0);
}

#[test]
fn test_retain_all_is_atomic() {
    let (_, registry) = registry();
    registry
        .add_color_attachment(
            "a",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    // "missing" fails resolution, so "a" must keep its count
    let result = registry.retain_all(&["a", "missing"]);
    assert!(matches!(result, Err(crate::error::Error::NotFound(_))));
    assert_eq!(registry.ref_count("a").unwrap(), 0);
}

#[test]
fn test_retain_all_increments_every_name() {
    let (_, registry) = registry();
    for name in ["a", "b"] {
        registry
            .add_color_attachment(
                name,
                Extent2d::new(64, 64),
                TextureFormat::R8G8B8A8_SRGB,
                ImageUsage::empty(),
                MemoryProperties::DEVICE_LOCAL,
            )
            .unwrap();
    }

    let resolved = registry.retain_all(&["a", "b"]).unwrap();
    assert_eq!(resolved.len(), 2);
    assert_eq!(registry.ref_count("a").unwrap(), 1);
    assert_eq!(registry.ref_count("b").unwrap(), 1);

    registry.retain_all(&["a"]).unwrap();
    assert_eq!(registry.ref_count("a").unwrap(), 2);
}

// ============================================================================
// Tests: Concurrency
// ============================================================================

#[test]
fn test_concurrent_lookups() {
    let device = Arc::new(MockGraphicsDevice::new());
    let registry = Arc::new(AttachmentRegistry::new(device));
    registry
        .add_color_attachment(
            "color",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    registry.attachment("color").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_retain_release_is_balanced() {
    let device = Arc::new(MockGraphicsDevice::new());
    let registry = Arc::new(AttachmentRegistry::new(device));
    registry
        .add_color_attachment(
            "color",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..250 {
                    registry.retain_all(&["color"]).unwrap();
                    registry.release_all(&["color"]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.ref_count("color").unwrap(), 0);
    registry.delete_attachment("color").unwrap();
}

#[test]
fn test_deletions_do_not_starve_lookups_of_other_names() {
    let device = Arc::new(MockGraphicsDevice::new());
    let registry = Arc::new(AttachmentRegistry::new(device));
    registry
        .add_color_attachment(
            "stable",
            Extent2d::new(64, 64),
            TextureFormat::R8G8B8A8_SRGB,
            ImageUsage::empty(),
            MemoryProperties::DEVICE_LOCAL,
        )
        .unwrap();

    // One thread churns create/delete cycles on "victim-*" names while
    // readers keep looking up "stable"; every lookup must succeed.
    let churner = {
        let registry = registry.clone();
        thread::spawn(move || {
            for round in 0..100 {
                let name = format!("victim-{}", round % 4);
                registry
                    .add_color_attachment(
                        &name,
                        Extent2d::new(16, 16),
                        TextureFormat::R8G8B8A8_SRGB,
                        ImageUsage::empty(),
                        MemoryProperties::DEVICE_LOCAL,
                    )
                    .unwrap();
                registry.delete_attachment(&name).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..250 {
                    let attachment = registry.attachment("stable").unwrap();
                    assert_eq!(attachment.extent(), Extent2d::new(64, 64));
                }
            })
        })
        .collect();

    churner.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(registry.attachment_count(), 1);
}
