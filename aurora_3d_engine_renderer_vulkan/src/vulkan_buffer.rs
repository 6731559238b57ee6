/// VulkanBuffer - Vulkan implementation of the GpuBuffer trait

use aurora_3d_engine::aurora3d::device::GpuBuffer;
use aurora_3d_engine::aurora3d::Result;
use aurora_3d_engine::{engine_bail, engine_err};
use ash::vk;
use gpu_allocator::vulkan::Allocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

const SOURCE: &str = "aurora3d::vulkan";

/// Vulkan buffer implementation
pub struct VulkanBuffer {
    /// Shared GPU context (device, allocator, queues)
    ctx: Arc<GpuContext>,
    /// Vulkan buffer
    pub(crate) buffer: vk::Buffer,
    /// GPU memory allocation
    allocation: Option<Allocation>,
    size: u64,
}

impl VulkanBuffer {
    pub(crate) fn new(
        ctx: Arc<GpuContext>,
        buffer: vk::Buffer,
        allocation: Allocation,
        size: u64,
    ) -> Self {
        Self {
            ctx,
            buffer,
            allocation: Some(allocation),
            size,
        }
    }
}

impl GpuBuffer for VulkanBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        let allocation = match &self.allocation {
            Some(allocation) => allocation,
            None => engine_bail!(DeviceCall, SOURCE, "buffer write failed: no GPU allocation"),
        };

        if data.len() as u64 > self.size {
            engine_bail!(DeviceCall, SOURCE,
                "buffer write of {} bytes exceeds buffer size {}", data.len(), self.size);
        }

        let mapped_ptr = allocation
            .mapped_ptr()
            .ok_or_else(|| engine_err!(DeviceCall, SOURCE, "buffer is not CPU-accessible"))?
            .as_ptr() as *mut u8;

        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), mapped_ptr, data.len());
        }
        Ok(())
    }
}

impl Drop for VulkanBuffer {
    fn drop(&mut self) {
        unsafe {
            // Free GPU memory
            if let Some(allocation) = self.allocation.take() {
                // Don't panic if lock fails - we still need to destroy the buffer
                if let Ok(mut allocator) = self.ctx.allocator.lock() {
                    allocator.free(allocation).ok();
                }
            }

            // Destroy buffer
            self.ctx.device.destroy_buffer(self.buffer, None);
        }
    }
}
