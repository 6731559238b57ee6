//! GraphicsContext - the engine's GPU-facing state, bundled into one value
//!
//! Construction wires the three registries to one device; teardown order is
//! fixed by field order (framebuffers, then render passes, then attachments,
//! then the device), so nothing is destroyed while something built on top of
//! it is still alive.

use std::sync::Arc;

use crate::attachment::AttachmentRegistry;
use crate::framebuffer::FramebufferRegistry;
use crate::graphics_device::GraphicsDevice;
use crate::render_pass::RenderPassRegistry;

const SOURCE: &str = "aurora3d::GraphicsContext";

/// Owns the registries and the device they share
///
/// Create one per device at startup and pass it by reference; there is no
/// global instance.
pub struct GraphicsContext {
    // Declaration order is drop order: dependents before dependencies
    framebuffers: FramebufferRegistry,
    render_passes: Arc<RenderPassRegistry>,
    attachments: Arc<AttachmentRegistry>,
    device: Arc<dyn GraphicsDevice>,
}

impl GraphicsContext {
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Self {
        let attachments = Arc::new(AttachmentRegistry::new(device.clone()));
        let render_passes = Arc::new(RenderPassRegistry::new(device.clone()));
        let framebuffers = FramebufferRegistry::new(
            device.clone(),
            render_passes.clone(),
            attachments.clone(),
        );
        crate::engine_info!(SOURCE, "graphics context created");
        Self {
            framebuffers,
            render_passes,
            attachments,
            device,
        }
    }

    pub fn device(&self) -> &Arc<dyn GraphicsDevice> {
        &self.device
    }

    pub fn attachments(&self) -> &AttachmentRegistry {
        &self.attachments
    }

    pub fn render_passes(&self) -> &RenderPassRegistry {
        &self.render_passes
    }

    pub fn framebuffers(&self) -> &FramebufferRegistry {
        &self.framebuffers
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
