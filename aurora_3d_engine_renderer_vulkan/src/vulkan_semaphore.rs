/// VulkanSemaphore - Vulkan implementation of the GpuSemaphore trait

use aurora_3d_engine::aurora3d::device::GpuSemaphore;
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Binary semaphore for cross-queue submit ordering
pub struct VulkanSemaphore {
    ctx: Arc<GpuContext>,
    /// Vulkan semaphore handle
    pub(crate) semaphore: vk::Semaphore,
}

impl VulkanSemaphore {
    pub(crate) fn new(ctx: Arc<GpuContext>, semaphore: vk::Semaphore) -> Self {
        Self { ctx, semaphore }
    }
}

impl GpuSemaphore for VulkanSemaphore {}

impl Drop for VulkanSemaphore {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_semaphore(self.semaphore, None);
        }
    }
}
