//! GraphicsDevice trait family - the only way the core talks to the GPU
//!
//! Backend crates (e.g. the Vulkan renderer) implement these traits; the
//! registries and the asset loader are written purely against them. All
//! resource traits are opaque trait objects whose concrete types free their
//! GPU objects on Drop.

use std::sync::Arc;

use crate::error::Result;
use super::types::{
    BufferBarrier, BufferDescription, CommandListUsage, Extent2d, FramebufferDescription,
    ImageBarrier, ImageDescription, ImageLayout, MemoryBarrier, PipelineStages, QueueInfo,
    RenderPassDescription, SamplerDescription, SubresourceRange, TextureFormat,
};

/// A GPU image together with its view and exclusively owned memory
pub trait GpuImage: Send + Sync {
    fn extent(&self) -> Extent2d;
    fn format(&self) -> TextureFormat;
    /// Full range covered by the image's view; both halves of a queue
    /// ownership transfer must use exactly this range.
    fn subresource_range(&self) -> SubresourceRange;
}

/// A GPU buffer with its backing allocation
pub trait GpuBuffer: Send + Sync {
    fn size(&self) -> u64;

    /// Write bytes at offset 0 through the host mapping.
    ///
    /// Fails with `Error::DeviceCall` if the buffer is not host-visible.
    fn write(&self, data: &[u8]) -> Result<()>;
}

/// A compiled native render pass object
pub trait GpuRenderPass: Send + Sync {}

/// A native framebuffer binding concrete views to a render pass
pub trait GpuFramebuffer: Send + Sync {
    fn extent(&self) -> Extent2d;
}

/// A native sampler object
pub trait GpuSampler: Send + Sync {}

/// A binary GPU semaphore for queue-to-queue ordering
pub trait GpuSemaphore: Send + Sync {}

/// A recordable, submittable command list bound to one named queue
///
/// Mirrors the narrow command-buffer contract the loader needs: record
/// barriers and copies, submit with semaphores, block until finished.
pub trait GpuCommandList: Send {
    /// Return the command list to its initial state
    fn reset(&mut self) -> Result<()>;

    fn begin_record(&mut self, usage: CommandListUsage) -> Result<()>;

    fn add_pipeline_barrier(
        &mut self,
        src_stages: PipelineStages,
        dst_stages: PipelineStages,
        memory_barriers: &[MemoryBarrier],
        buffer_barriers: &[BufferBarrier],
        image_barriers: &[ImageBarrier],
    ) -> Result<()>;

    /// Copy the whole buffer into the image (tightly packed, offset 0)
    fn copy_buffer_to_image(
        &mut self,
        src: &Arc<dyn GpuBuffer>,
        dst: &Arc<dyn GpuImage>,
        dst_layout: ImageLayout,
    ) -> Result<()>;

    /// Copy `size` bytes between buffers (offset 0 on both sides)
    fn copy_buffer(
        &mut self,
        src: &Arc<dyn GpuBuffer>,
        dst: &Arc<dyn GpuBuffer>,
        size: u64,
    ) -> Result<()>;

    fn end_record(&mut self) -> Result<()>;

    /// Submit the recording to this list's queue.
    ///
    /// `wait_stages` pairs with `wait_semaphores` index-for-index.
    fn submit(
        &mut self,
        wait_semaphores: &[Arc<dyn GpuSemaphore>],
        wait_stages: &[PipelineStages],
        signal_semaphores: &[Arc<dyn GpuSemaphore>],
    ) -> Result<()>;

    /// Block the calling thread until the last submit has finished on the GPU.
    ///
    /// The wait is unbounded; a stuck GPU manifests as a hang here.
    fn wait_for_finish(&self) -> Result<()>;
}

/// Main graphics device trait
///
/// Central factory for GPU resources and the name→queue mapping. The core
/// never creates queues; it only reads their family indices for barrier
/// construction.
pub trait GraphicsDevice: Send + Sync {
    /// Create an image with view and bound memory (allocated immediately)
    fn create_image(&self, desc: &ImageDescription) -> Result<Arc<dyn GpuImage>>;

    /// Create a buffer with bound memory
    fn create_buffer(&self, desc: &BufferDescription) -> Result<Arc<dyn GpuBuffer>>;

    /// Create a native render pass from a compiled description
    fn create_render_pass(&self, desc: &RenderPassDescription) -> Result<Arc<dyn GpuRenderPass>>;

    /// Create a native framebuffer binding views to a render pass
    fn create_framebuffer(&self, desc: &FramebufferDescription) -> Result<Arc<dyn GpuFramebuffer>>;

    fn create_sampler(&self, desc: &SamplerDescription) -> Result<Arc<dyn GpuSampler>>;

    fn create_semaphore(&self) -> Result<Arc<dyn GpuSemaphore>>;

    /// Create a command list that records for and submits to the named queue
    fn create_command_list(&self, queue_name: &str) -> Result<Box<dyn GpuCommandList>>;

    /// Look up a named queue's identity (fails with `Error::NotFound`)
    fn queue(&self, name: &str) -> Result<QueueInfo>;

    /// Block until the device is idle on all queues
    fn wait_idle(&self) -> Result<()>;
}
