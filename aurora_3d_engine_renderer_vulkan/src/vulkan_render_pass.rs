/// VulkanRenderPass - Vulkan implementation of the GpuRenderPass trait

use aurora_3d_engine::aurora3d::device::GpuRenderPass;
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Vulkan render pass implementation
///
/// Simple wrapper around vk::RenderPass
pub struct VulkanRenderPass {
    ctx: Arc<GpuContext>,
    /// Vulkan render pass handle
    pub(crate) render_pass: vk::RenderPass,
}

impl VulkanRenderPass {
    pub(crate) fn new(ctx: Arc<GpuContext>, render_pass: vk::RenderPass) -> Self {
        Self { ctx, render_pass }
    }
}

impl GpuRenderPass for VulkanRenderPass {
    // No methods needed for now - just a type-safe wrapper
}

impl Drop for VulkanRenderPass {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_render_pass(self.render_pass, None);
        }
    }
}
