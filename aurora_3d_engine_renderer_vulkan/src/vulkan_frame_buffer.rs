/// VulkanFramebuffer - Vulkan implementation of the GpuFramebuffer trait
///
/// Wraps a VkFramebuffer that groups color and depth/stencil attachment
/// views. Created once via GraphicsDevice::create_framebuffer(), reused
/// each frame.

use aurora_3d_engine::aurora3d::device::{Extent2d, GpuFramebuffer};
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Vulkan framebuffer implementation
///
/// Wraps a VkFramebuffer. Destroyed when dropped.
pub struct VulkanFramebuffer {
    ctx: Arc<GpuContext>,
    /// Vulkan framebuffer handle
    pub(crate) framebuffer: vk::Framebuffer,
    extent: Extent2d,
}

impl VulkanFramebuffer {
    pub(crate) fn new(ctx: Arc<GpuContext>, framebuffer: vk::Framebuffer, extent: Extent2d) -> Self {
        Self {
            ctx,
            framebuffer,
            extent,
        }
    }
}

impl GpuFramebuffer for VulkanFramebuffer {
    fn extent(&self) -> Extent2d {
        self.extent
    }
}

impl Drop for VulkanFramebuffer {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_framebuffer(self.framebuffer, None);
        }
    }
}
