/// VulkanImage - Vulkan implementation of the GpuImage trait

use aurora_3d_engine::aurora3d::device::{
    Extent2d, GpuImage, ImageAspect, SubresourceRange, TextureFormat,
};
use ash::vk;
use gpu_allocator::vulkan::Allocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Vulkan image implementation
///
/// Owns the VkImage, its view, and its memory allocation; all three are
/// released on Drop through the shared context.
pub struct VulkanImage {
    /// Shared GPU context (device, allocator, queues)
    ctx: Arc<GpuContext>,
    /// Vulkan image
    pub(crate) image: vk::Image,
    /// Vulkan image view
    pub(crate) view: vk::ImageView,
    /// GPU memory allocation
    allocation: Option<Allocation>,
    extent: Extent2d,
    format: TextureFormat,
    aspect: ImageAspect,
    mip_levels: u32,
}

impl VulkanImage {
    pub(crate) fn new(
        ctx: Arc<GpuContext>,
        image: vk::Image,
        view: vk::ImageView,
        allocation: Allocation,
        extent: Extent2d,
        format: TextureFormat,
        aspect: ImageAspect,
        mip_levels: u32,
    ) -> Self {
        Self {
            ctx,
            image,
            view,
            allocation: Some(allocation),
            extent,
            format,
            aspect,
            mip_levels,
        }
    }
}

impl GpuImage for VulkanImage {
    fn extent(&self) -> Extent2d {
        self.extent
    }

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn subresource_range(&self) -> SubresourceRange {
        SubresourceRange {
            aspect: self.aspect,
            base_mip_level: 0,
            level_count: self.mip_levels,
            base_array_layer: 0,
            layer_count: 1,
        }
    }
}

impl Drop for VulkanImage {
    fn drop(&mut self) {
        unsafe {
            // Destroy image view
            self.ctx.device.destroy_image_view(self.view, None);

            // Free GPU memory
            if let Some(allocation) = self.allocation.take() {
                // Don't panic if lock fails - we still need to destroy the image
                if let Ok(mut allocator) = self.ctx.allocator.lock() {
                    allocator.free(allocation).ok();
                }
            }

            // Destroy image
            self.ctx.device.destroy_image(self.image, None);
        }
    }
}
