/// VulkanSampler - Vulkan implementation of the GpuSampler trait

use aurora_3d_engine::aurora3d::device::GpuSampler;
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Vulkan sampler implementation
pub struct VulkanSampler {
    ctx: Arc<GpuContext>,
    /// Vulkan sampler handle
    pub(crate) sampler: vk::Sampler,
}

impl VulkanSampler {
    pub(crate) fn new(ctx: Arc<GpuContext>, sampler: vk::Sampler) -> Self {
        Self { ctx, sampler }
    }
}

impl GpuSampler for VulkanSampler {}

impl Drop for VulkanSampler {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_sampler(self.sampler, None);
        }
    }
}
