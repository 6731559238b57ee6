/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every resource creation, barrier, copy and submit so tests can
/// assert registry behavior and the upload protocol's release/acquire
/// pairing without a real device.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use super::graphics_device::{
    GpuBuffer, GpuCommandList, GpuFramebuffer, GpuImage, GpuRenderPass, GpuSampler, GpuSemaphore,
    GraphicsDevice,
};
use super::types::{
    Access, BufferBarrier, BufferDescription, CommandListUsage, Extent2d, FramebufferDescription,
    ImageBarrier, ImageDescription, ImageLayout, MemoryBarrier, MemoryProperties, PipelineStages,
    QueueInfo, RenderPassDescription, SamplerDescription, SubresourceRange, TextureFormat,
};

// ============================================================================
// Recorded events
// ============================================================================

/// Image barrier snapshot (without the image handle)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockImageBarrier {
    pub old_layout: ImageLayout,
    pub new_layout: ImageLayout,
    pub src_access: Access,
    pub dst_access: Access,
    pub src_queue_family: u32,
    pub dst_queue_family: u32,
    pub subresource_range: SubresourceRange,
}

/// Buffer barrier snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockBufferBarrier {
    pub src_access: Access,
    pub dst_access: Access,
    pub src_queue_family: u32,
    pub dst_queue_family: u32,
    pub offset: u64,
    pub size: u64,
}

/// One recorded GPU-timeline event, tagged with the issuing queue family
#[derive(Debug, Clone, PartialEq)]
pub enum MockEvent {
    Barrier {
        queue_family: u32,
        src_stages: PipelineStages,
        dst_stages: PipelineStages,
        image_barriers: Vec<MockImageBarrier>,
        buffer_barriers: Vec<MockBufferBarrier>,
    },
    CopyBufferToImage {
        queue_family: u32,
        buffer_size: u64,
        image_extent: Extent2d,
    },
    CopyBuffer {
        queue_family: u32,
        size: u64,
    },
    Submit {
        queue_family: u32,
        wait_semaphores: Vec<u64>,
        signal_semaphores: Vec<u64>,
    },
    WaitForFinish {
        queue_family: u32,
    },
}

// ============================================================================
// Mock resources
// ============================================================================

#[derive(Debug)]
pub struct MockImage {
    pub desc: ImageDescription,
}

impl GpuImage for MockImage {
    fn extent(&self) -> Extent2d {
        self.desc.extent
    }

    fn format(&self) -> TextureFormat {
        self.desc.format
    }

    fn subresource_range(&self) -> SubresourceRange {
        SubresourceRange {
            aspect: self.desc.aspect,
            base_mip_level: 0,
            level_count: self.desc.mip_levels,
            base_array_layer: 0,
            layer_count: 1,
        }
    }
}

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub host_visible: bool,
    pub data: Mutex<Vec<u8>>,
}

impl GpuBuffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        if !self.host_visible {
            return Err(Error::DeviceCall(
                "mock buffer is not host-visible".to_string(),
            ));
        }
        let mut stored = self.data.lock().unwrap();
        stored.clear();
        stored.extend_from_slice(data);
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockRenderPass {
    pub description: RenderPassDescription,
}

impl GpuRenderPass for MockRenderPass {}

#[derive(Debug)]
pub struct MockFramebuffer {
    pub extent: Extent2d,
    pub attachment_count: usize,
}

impl GpuFramebuffer for MockFramebuffer {
    fn extent(&self) -> Extent2d {
        self.extent
    }
}

#[derive(Debug)]
pub struct MockSampler {
    pub desc: SamplerDescription,
}

impl GpuSampler for MockSampler {}

#[derive(Debug)]
pub struct MockSemaphore {
    pub id: u64,
}

impl GpuSemaphore for MockSemaphore {}

// ============================================================================
// Mock command list
// ============================================================================

pub struct MockCommandList {
    queue_family: u32,
    events: Arc<Mutex<Vec<MockEvent>>>,
    is_recording: bool,
}

impl MockCommandList {
    fn semaphore_id(semaphore: &Arc<dyn GpuSemaphore>) -> u64 {
        // Downcast to the mock type to read its id
        let mock = semaphore.as_ref() as *const dyn GpuSemaphore as *const MockSemaphore;
        unsafe { (*mock).id }
    }
}

impl GpuCommandList for MockCommandList {
    fn reset(&mut self) -> Result<()> {
        self.is_recording = false;
        Ok(())
    }

    fn begin_record(&mut self, _usage: CommandListUsage) -> Result<()> {
        if self.is_recording {
            return Err(Error::DeviceCall(
                "mock command list already recording".to_string(),
            ));
        }
        self.is_recording = true;
        Ok(())
    }

    fn add_pipeline_barrier(
        &mut self,
        src_stages: PipelineStages,
        dst_stages: PipelineStages,
        _memory_barriers: &[MemoryBarrier],
        buffer_barriers: &[BufferBarrier],
        image_barriers: &[ImageBarrier],
    ) -> Result<()> {
        if !self.is_recording {
            return Err(Error::DeviceCall(
                "mock command list not recording".to_string(),
            ));
        }
        self.events.lock().unwrap().push(MockEvent::Barrier {
            queue_family: self.queue_family,
            src_stages,
            dst_stages,
            image_barriers: image_barriers
                .iter()
                .map(|b| MockImageBarrier {
                    old_layout: b.old_layout,
                    new_layout: b.new_layout,
                    src_access: b.src_access,
                    dst_access: b.dst_access,
                    src_queue_family: b.src_queue_family,
                    dst_queue_family: b.dst_queue_family,
                    subresource_range: b.subresource_range,
                })
                .collect(),
            buffer_barriers: buffer_barriers
                .iter()
                .map(|b| MockBufferBarrier {
                    src_access: b.src_access,
                    dst_access: b.dst_access,
                    src_queue_family: b.src_queue_family,
                    dst_queue_family: b.dst_queue_family,
                    offset: b.offset,
                    size: b.size,
                })
                .collect(),
        });
        Ok(())
    }

    fn copy_buffer_to_image(
        &mut self,
        src: &Arc<dyn GpuBuffer>,
        dst: &Arc<dyn GpuImage>,
        _dst_layout: ImageLayout,
    ) -> Result<()> {
        if !self.is_recording {
            return Err(Error::DeviceCall(
                "mock command list not recording".to_string(),
            ));
        }
        self.events.lock().unwrap().push(MockEvent::CopyBufferToImage {
            queue_family: self.queue_family,
            buffer_size: src.size(),
            image_extent: dst.extent(),
        });
        Ok(())
    }

    fn copy_buffer(
        &mut self,
        _src: &Arc<dyn GpuBuffer>,
        _dst: &Arc<dyn GpuBuffer>,
        size: u64,
    ) -> Result<()> {
        if !self.is_recording {
            return Err(Error::DeviceCall(
                "mock command list not recording".to_string(),
            ));
        }
        self.events.lock().unwrap().push(MockEvent::CopyBuffer {
            queue_family: self.queue_family,
            size,
        });
        Ok(())
    }

    fn end_record(&mut self) -> Result<()> {
        if !self.is_recording {
            return Err(Error::DeviceCall(
                "mock command list not recording".to_string(),
            ));
        }
        self.is_recording = false;
        Ok(())
    }

    fn submit(
        &mut self,
        wait_semaphores: &[Arc<dyn GpuSemaphore>],
        _wait_stages: &[PipelineStages],
        signal_semaphores: &[Arc<dyn GpuSemaphore>],
    ) -> Result<()> {
        self.events.lock().unwrap().push(MockEvent::Submit {
            queue_family: self.queue_family,
            wait_semaphores: wait_semaphores.iter().map(Self::semaphore_id).collect(),
            signal_semaphores: signal_semaphores.iter().map(Self::semaphore_id).collect(),
        });
        Ok(())
    }

    fn wait_for_finish(&self) -> Result<()> {
        self.events.lock().unwrap().push(MockEvent::WaitForFinish {
            queue_family: self.queue_family,
        });
        Ok(())
    }
}

// ============================================================================
// Mock device
// ============================================================================

pub struct MockGraphicsDevice {
    queues: FxHashMap<String, u32>,
    /// Ordered GPU-timeline event log, shared by all command lists
    pub events: Arc<Mutex<Vec<MockEvent>>>,
    /// Every image description passed to create_image
    pub created_images: Mutex<Vec<ImageDescription>>,
    /// Every buffer description passed to create_buffer
    pub created_buffers: Mutex<Vec<BufferDescription>>,
    /// Every compiled render pass description
    pub created_render_passes: Mutex<Vec<RenderPassDescription>>,
    /// Extent of every framebuffer created
    pub created_framebuffers: Mutex<Vec<Extent2d>>,
    next_semaphore_id: AtomicU64,
    fail_samplers: AtomicBool,
}

impl MockGraphicsDevice {
    /// Device with the default queue table:
    /// "GraphicsQueue" → family 0, "TransferQueue" → family 1
    pub fn new() -> Self {
        let mut queues = FxHashMap::default();
        queues.insert("GraphicsQueue".to_string(), 0);
        queues.insert("TransferQueue".to_string(), 1);
        Self::with_queues(queues)
    }

    pub fn with_queues(queues: FxHashMap<String, u32>) -> Self {
        Self {
            queues,
            events: Arc::new(Mutex::new(Vec::new())),
            created_images: Mutex::new(Vec::new()),
            created_buffers: Mutex::new(Vec::new()),
            created_render_passes: Mutex::new(Vec::new()),
            created_framebuffers: Mutex::new(Vec::new()),
            next_semaphore_id: AtomicU64::new(1),
            fail_samplers: AtomicBool::new(false),
        }
    }

    /// Make every subsequent create_sampler call fail with DeviceCall
    pub fn fail_samplers(&self, fail: bool) {
        self.fail_samplers.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the event log
    pub fn event_log(&self) -> Vec<MockEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_image(&self, desc: &ImageDescription) -> Result<Arc<dyn GpuImage>> {
        self.created_images.lock().unwrap().push(*desc);
        Ok(Arc::new(MockImage { desc: *desc }))
    }

    fn create_buffer(&self, desc: &BufferDescription) -> Result<Arc<dyn GpuBuffer>> {
        self.created_buffers.lock().unwrap().push(*desc);
        Ok(Arc::new(MockBuffer {
            size: desc.size,
            host_visible: desc.properties.contains(MemoryProperties::HOST_VISIBLE),
            data: Mutex::new(Vec::new()),
        }))
    }

    fn create_render_pass(&self, desc: &RenderPassDescription) -> Result<Arc<dyn GpuRenderPass>> {
        self.created_render_passes.lock().unwrap().push(desc.clone());
        Ok(Arc::new(MockRenderPass {
            description: desc.clone(),
        }))
    }

    fn create_framebuffer(&self, desc: &FramebufferDescription) -> Result<Arc<dyn GpuFramebuffer>> {
        self.created_framebuffers.lock().unwrap().push(desc.extent);
        Ok(Arc::new(MockFramebuffer {
            extent: desc.extent,
            attachment_count: desc.attachments.len(),
        }))
    }

    fn create_sampler(&self, desc: &SamplerDescription) -> Result<Arc<dyn GpuSampler>> {
        if self.fail_samplers.load(Ordering::SeqCst) {
            return Err(Error::DeviceCall(
                "mock sampler creation failure".to_string(),
            ));
        }
        Ok(Arc::new(MockSampler { desc: *desc }))
    }

    fn create_semaphore(&self) -> Result<Arc<dyn GpuSemaphore>> {
        Ok(Arc::new(MockSemaphore {
            id: self.next_semaphore_id.fetch_add(1, Ordering::SeqCst),
        }))
    }

    fn create_command_list(&self, queue_name: &str) -> Result<Box<dyn GpuCommandList>> {
        let family = *self
            .queues
            .get(queue_name)
            .ok_or_else(|| Error::NotFound(format!("queue '{}'", queue_name)))?;
        Ok(Box::new(MockCommandList {
            queue_family: family,
            events: self.events.clone(),
            is_recording: false,
        }))
    }

    fn queue(&self, name: &str) -> Result<QueueInfo> {
        self.queues
            .get(name)
            .map(|&family_index| QueueInfo {
                name: name.to_string(),
                family_index,
            })
            .ok_or_else(|| Error::NotFound(format!("queue '{}'", name)))
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics_device::{BufferUsage, ImageAspect, ImageTiling, ImageUsage};

    #[test]
    fn test_command_list_rejects_copies_outside_recording() {
        let device = MockGraphicsDevice::new();
        let mut list = device.create_command_list("TransferQueue").unwrap();

        let src = device
            .create_buffer(&BufferDescription {
                size: 64,
                usage: BufferUsage::TRANSFER_SRC,
                properties: MemoryProperties::HOST_VISIBLE,
            })
            .unwrap();
        let dst = device
            .create_image(&ImageDescription {
                extent: Extent2d::new(4, 4),
                format: TextureFormat::R8G8B8A8_SRGB,
                tiling: ImageTiling::Optimal,
                usage: ImageUsage::TRANSFER_DST,
                properties: MemoryProperties::DEVICE_LOCAL,
                aspect: ImageAspect::COLOR,
                mip_levels: 1,
            })
            .unwrap();

        // Copies before begin_record are recording-order misuse
        assert!(matches!(
            list.copy_buffer_to_image(&src, &dst, ImageLayout::TransferDstOptimal),
            Err(Error::DeviceCall(_))
        ));
        assert!(matches!(
            list.copy_buffer(&src, &src, 64),
            Err(Error::DeviceCall(_))
        ));

        list.begin_record(CommandListUsage::OneTimeSubmit).unwrap();
        list.copy_buffer_to_image(&src, &dst, ImageLayout::TransferDstOptimal)
            .unwrap();
        list.copy_buffer(&src, &src, 64).unwrap();
        list.end_record().unwrap();

        // And so are copies after end_record
        assert!(matches!(
            list.copy_buffer(&src, &src, 64),
            Err(Error::DeviceCall(_))
        ));
        assert_eq!(device.event_log().len(), 2);
    }
}
