/// VulkanCommandList - Vulkan implementation of the GpuCommandList trait
///
/// One command pool + primary command buffer + fence, bound to one named
/// queue. Submission takes the queue's lock (vkQueueSubmit is externally
/// synchronized); the fence backs wait_for_finish.

use aurora_3d_engine::aurora3d::device::{
    BufferBarrier, CommandListUsage, GpuBuffer, GpuCommandList, GpuImage, GpuSemaphore,
    ImageBarrier, ImageLayout, MemoryBarrier, PipelineStages,
};
use aurora_3d_engine::aurora3d::Result;
use aurora_3d_engine::{engine_bail, engine_err};
use ash::vk;
use std::sync::Arc;

use crate::vulkan_buffer::VulkanBuffer;
use crate::vulkan_context::{GpuContext, VulkanQueue};
use crate::vulkan_device::{
    access_to_vk, aspect_to_vk, image_layout_to_vk, pipeline_stages_to_vk,
};
use crate::vulkan_image::VulkanImage;
use crate::vulkan_semaphore::VulkanSemaphore;

const SOURCE: &str = "aurora3d::vulkan";

/// Vulkan command list implementation
pub struct VulkanCommandList {
    ctx: Arc<GpuContext>,
    queue: Arc<VulkanQueue>,
    command_pool: vk::CommandPool,
    command_buffer: vk::CommandBuffer,
    /// Signals when the last submit finishes; created signaled
    fence: vk::Fence,
    is_recording: bool,
}

impl VulkanCommandList {
    pub(crate) fn new(ctx: Arc<GpuContext>, queue: Arc<VulkanQueue>) -> Result<Self> {
        unsafe {
            let pool_create_info = vk::CommandPoolCreateInfo::default()
                .queue_family_index(queue.family_index)
                .flags(
                    vk::CommandPoolCreateFlags::TRANSIENT
                        | vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER,
                );

            let command_pool = ctx
                .device
                .create_command_pool(&pool_create_info, None)
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to create command pool: {:?}", e)
                })?;

            let allocate_info = vk::CommandBufferAllocateInfo::default()
                .command_pool(command_pool)
                .level(vk::CommandBufferLevel::PRIMARY)
                .command_buffer_count(1);

            let command_buffers = ctx
                .device
                .allocate_command_buffers(&allocate_info)
                .map_err(|e| {
                    ctx.device.destroy_command_pool(command_pool, None);
                    engine_err!(DeviceCall, SOURCE, "Failed to allocate command buffer: {:?}", e)
                })?;

            let fence_create_info =
                vk::FenceCreateInfo::default().flags(vk::FenceCreateFlags::SIGNALED);
            let fence = ctx
                .device
                .create_fence(&fence_create_info, None)
                .map_err(|e| {
                    ctx.device.destroy_command_pool(command_pool, None);
                    engine_err!(DeviceCall, SOURCE, "Failed to create submit fence: {:?}", e)
                })?;

            Ok(Self {
                ctx,
                queue,
                command_pool,
                command_buffer: command_buffers[0],
                fence,
                is_recording: false,
            })
        }
    }

    /// Downcast a trait-object buffer to the Vulkan type to read its handle
    fn vk_buffer(buffer: &Arc<dyn GpuBuffer>) -> vk::Buffer {
        let vulkan = buffer.as_ref() as *const dyn GpuBuffer as *const VulkanBuffer;
        unsafe { (*vulkan).buffer }
    }

    fn vk_image(image: &Arc<dyn GpuImage>) -> vk::Image {
        let vulkan = image.as_ref() as *const dyn GpuImage as *const VulkanImage;
        unsafe { (*vulkan).image }
    }

    fn vk_semaphore(semaphore: &Arc<dyn GpuSemaphore>) -> vk::Semaphore {
        let vulkan = semaphore.as_ref() as *const dyn GpuSemaphore as *const VulkanSemaphore;
        unsafe { (*vulkan).semaphore }
    }
}

impl GpuCommandList for VulkanCommandList {
    fn reset(&mut self) -> Result<()> {
        unsafe {
            self.ctx
                .device
                .reset_command_buffer(self.command_buffer, vk::CommandBufferResetFlags::empty())
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to reset command buffer: {:?}", e)
                })?;
        }
        self.is_recording = false;
        Ok(())
    }

    fn begin_record(&mut self, usage: CommandListUsage) -> Result<()> {
        if self.is_recording {
            engine_bail!(DeviceCall, SOURCE, "Command list already recording");
        }

        let flags = match usage {
            CommandListUsage::OneTimeSubmit => vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT,
            CommandListUsage::Reusable => vk::CommandBufferUsageFlags::empty(),
        };
        let begin_info = vk::CommandBufferBeginInfo::default().flags(flags);

        unsafe {
            self.ctx
                .device
                .begin_command_buffer(self.command_buffer, &begin_info)
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to begin command buffer: {:?}", e)
                })?;
        }
        self.is_recording = true;
        Ok(())
    }

    fn add_pipeline_barrier(
        &mut self,
        src_stages: PipelineStages,
        dst_stages: PipelineStages,
        memory_barriers: &[MemoryBarrier],
        buffer_barriers: &[BufferBarrier],
        image_barriers: &[ImageBarrier],
    ) -> Result<()> {
        if !self.is_recording {
            engine_bail!(DeviceCall, SOURCE, "Command list not recording");
        }

        let vk_memory: Vec<vk::MemoryBarrier> = memory_barriers
            .iter()
            .map(|b| {
                vk::MemoryBarrier::default()
                    .src_access_mask(access_to_vk(b.src_access))
                    .dst_access_mask(access_to_vk(b.dst_access))
            })
            .collect();

        let vk_buffers: Vec<vk::BufferMemoryBarrier> = buffer_barriers
            .iter()
            .map(|b| {
                vk::BufferMemoryBarrier::default()
                    .buffer(Self::vk_buffer(&b.buffer))
                    .src_access_mask(access_to_vk(b.src_access))
                    .dst_access_mask(access_to_vk(b.dst_access))
                    .src_queue_family_index(b.src_queue_family)
                    .dst_queue_family_index(b.dst_queue_family)
                    .offset(b.offset)
                    .size(b.size)
            })
            .collect();

        let vk_images: Vec<vk::ImageMemoryBarrier> = image_barriers
            .iter()
            .map(|b| {
                vk::ImageMemoryBarrier::default()
                    .image(Self::vk_image(&b.image))
                    .old_layout(image_layout_to_vk(b.old_layout))
                    .new_layout(image_layout_to_vk(b.new_layout))
                    .src_access_mask(access_to_vk(b.src_access))
                    .dst_access_mask(access_to_vk(b.dst_access))
                    .src_queue_family_index(b.src_queue_family)
                    .dst_queue_family_index(b.dst_queue_family)
                    .subresource_range(vk::ImageSubresourceRange {
                        aspect_mask: aspect_to_vk(b.subresource_range.aspect),
                        base_mip_level: b.subresource_range.base_mip_level,
                        level_count: b.subresource_range.level_count,
                        base_array_layer: b.subresource_range.base_array_layer,
                        layer_count: b.subresource_range.layer_count,
                    })
            })
            .collect();

        unsafe {
            self.ctx.device.cmd_pipeline_barrier(
                self.command_buffer,
                pipeline_stages_to_vk(src_stages),
                pipeline_stages_to_vk(dst_stages),
                vk::DependencyFlags::empty(),
                &vk_memory,
                &vk_buffers,
                &vk_images,
            );
        }
        Ok(())
    }

    fn copy_buffer_to_image(
        &mut self,
        src: &Arc<dyn GpuBuffer>,
        dst: &Arc<dyn GpuImage>,
        dst_layout: ImageLayout,
    ) -> Result<()> {
        if !self.is_recording {
            engine_bail!(DeviceCall, SOURCE, "Command list not recording");
        }

        let extent = dst.extent();
        let range = dst.subresource_range();
        let region = vk::BufferImageCopy::default()
            .buffer_offset(0)
            .buffer_row_length(0)
            .buffer_image_height(0)
            .image_subresource(vk::ImageSubresourceLayers {
                aspect_mask: aspect_to_vk(range.aspect),
                mip_level: 0,
                base_array_layer: 0,
                layer_count: 1,
            })
            .image_offset(vk::Offset3D { x: 0, y: 0, z: 0 })
            .image_extent(vk::Extent3D {
                width: extent.width,
                height: extent.height,
                depth: 1,
            });

        unsafe {
            self.ctx.device.cmd_copy_buffer_to_image(
                self.command_buffer,
                Self::vk_buffer(src),
                Self::vk_image(dst),
                image_layout_to_vk(dst_layout),
                std::slice::from_ref(&region),
            );
        }
        Ok(())
    }

    fn copy_buffer(
        &mut self,
        src: &Arc<dyn GpuBuffer>,
        dst: &Arc<dyn GpuBuffer>,
        size: u64,
    ) -> Result<()> {
        if !self.is_recording {
            engine_bail!(DeviceCall, SOURCE, "Command list not recording");
        }

        let region = vk::BufferCopy::default()
            .src_offset(0)
            .dst_offset(0)
            .size(size);

        unsafe {
            self.ctx.device.cmd_copy_buffer(
                self.command_buffer,
                Self::vk_buffer(src),
                Self::vk_buffer(dst),
                std::slice::from_ref(&region),
            );
        }
        Ok(())
    }

    fn end_record(&mut self) -> Result<()> {
        if !self.is_recording {
            engine_bail!(DeviceCall, SOURCE, "Command list not recording");
        }
        unsafe {
            self.ctx
                .device
                .end_command_buffer(self.command_buffer)
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to end command buffer: {:?}", e)
                })?;
        }
        self.is_recording = false;
        Ok(())
    }

    fn submit(
        &mut self,
        wait_semaphores: &[Arc<dyn GpuSemaphore>],
        wait_stages: &[PipelineStages],
        signal_semaphores: &[Arc<dyn GpuSemaphore>],
    ) -> Result<()> {
        if wait_semaphores.len() != wait_stages.len() {
            engine_bail!(DeviceCall, SOURCE,
                "submit: {} wait semaphore(s) but {} wait stage(s)",
                wait_semaphores.len(), wait_stages.len());
        }

        let vk_wait: Vec<vk::Semaphore> = wait_semaphores.iter().map(Self::vk_semaphore).collect();
        let vk_wait_stages: Vec<vk::PipelineStageFlags> =
            wait_stages.iter().map(|s| pipeline_stages_to_vk(*s)).collect();
        let vk_signal: Vec<vk::Semaphore> =
            signal_semaphores.iter().map(Self::vk_semaphore).collect();

        let command_buffers = [self.command_buffer];
        let submit_info = vk::SubmitInfo::default()
            .wait_semaphores(&vk_wait)
            .wait_dst_stage_mask(&vk_wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&vk_signal);

        unsafe {
            self.ctx
                .device
                .reset_fences(std::slice::from_ref(&self.fence))
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to reset submit fence: {:?}", e)
                })?;

            // vkQueueSubmit is externally synchronized per queue
            let _guard = self.queue.submit_lock.lock().unwrap();
            self.ctx
                .device
                .queue_submit(self.queue.raw, std::slice::from_ref(&submit_info), self.fence)
                .map_err(|e| engine_err!(DeviceCall, SOURCE, "Failed to submit: {:?}", e))?;
        }
        Ok(())
    }

    fn wait_for_finish(&self) -> Result<()> {
        unsafe {
            self.ctx
                .device
                .wait_for_fences(std::slice::from_ref(&self.fence), true, u64::MAX)
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to wait for submit fence: {:?}", e)
                })?;
        }
        Ok(())
    }
}

impl Drop for VulkanCommandList {
    fn drop(&mut self) {
        unsafe {
            // Outstanding submits must finish before the pool goes away
            let _ = self
                .ctx
                .device
                .wait_for_fences(std::slice::from_ref(&self.fence), true, u64::MAX);
            self.ctx.device.destroy_fence(self.fence, None);
            self.ctx.device.destroy_command_pool(self.command_pool, None);
        }
    }
}
