/// VulkanDevice - Vulkan implementation of the GraphicsDevice trait
///
/// Headless bootstrap: instance, physical device pick, logical device with
/// one graphics and one transfer queue, gpu-allocator. No surface or
/// swapchain; presentation is out of scope for this backend.

use aurora_3d_engine::aurora3d::device::{
    Access, AddressMode, AttachmentLoadOp, AttachmentStoreOp, BorderColor, BufferDescription,
    BufferUsage, Extent2d, Filter, FramebufferDescription, GpuBuffer, GpuCommandList,
    GpuFramebuffer, GpuImage, GpuRenderPass, GpuSampler, GpuSemaphore, GraphicsDevice,
    ImageAspect, ImageDescription, ImageLayout, ImageTiling, ImageUsage, MemoryProperties,
    PipelineBindPoint, PipelineStages, QueueInfo, RenderPassDescription, SamplerDescription,
    TextureFormat, EXTERNAL_SUBPASS_INDEX,
};
use aurora_3d_engine::aurora3d::{Error, Result};
use aurora_3d_engine::{engine_err, engine_error, engine_info};
use ash::vk;
use gpu_allocator::vulkan::{Allocator, AllocatorCreateDesc};
use rustc_hash::FxHashMap;
use std::ffi::CString;
use std::mem::ManuallyDrop;
use std::sync::{Arc, Mutex};

use crate::vulkan_buffer::VulkanBuffer;
use crate::vulkan_command_list::VulkanCommandList;
use crate::vulkan_context::{GpuContext, VulkanQueue};
use crate::vulkan_frame_buffer::VulkanFramebuffer;
use crate::vulkan_image::VulkanImage;
use crate::vulkan_render_pass::VulkanRenderPass;
use crate::vulkan_sampler::VulkanSampler;
use crate::vulkan_semaphore::VulkanSemaphore;

const SOURCE: &str = "aurora3d::vulkan";

/// Device bootstrap configuration
#[derive(Debug, Clone)]
pub struct VulkanDeviceConfig {
    /// Application name reported to the driver
    pub app_name: String,
    /// Name the graphics queue is registered under
    pub graphics_queue_name: String,
    /// Name the transfer queue is registered under
    pub transfer_queue_name: String,
}

impl Default for VulkanDeviceConfig {
    fn default() -> Self {
        Self {
            app_name: "Aurora3D Application".to_string(),
            graphics_queue_name: "GraphicsQueue".to_string(),
            transfer_queue_name: "TransferQueue".to_string(),
        }
    }
}

/// Vulkan device implementation
///
/// Central object for creating resources and command lists. Every resource
/// it creates shares the GpuContext, which owns device/instance teardown.
pub struct VulkanDevice {
    /// Vulkan entry, kept alive for the instance's lifetime
    _entry: ash::Entry,
    /// Shared GPU context for all resources
    ctx: Arc<GpuContext>,
}

impl VulkanDevice {
    pub fn new(config: VulkanDeviceConfig) -> Result<Self> {
        unsafe {
            let entry = ash::Entry::load().map_err(|e| {
                engine_err!(InitializationFailed, SOURCE, "Failed to load Vulkan library: {:?}", e)
            })?;

            let app_name = CString::new(config.app_name.as_str()).map_err(|e| {
                engine_err!(InitializationFailed, SOURCE, "Invalid application name: {}", e)
            })?;
            let app_info = vk::ApplicationInfo::default()
                .application_name(app_name.as_c_str())
                .application_version(vk::make_api_version(0, 1, 0, 0))
                .engine_name(c"Aurora3D")
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_3);

            #[allow(unused_mut)]
            let mut extension_names: Vec<*const std::ffi::c_char> = Vec::new();
            #[allow(unused_mut)]
            let mut layer_names: Vec<*const std::ffi::c_char> = Vec::new();

            #[cfg(feature = "vulkan-validation")]
            {
                extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
                layer_names.push(c"VK_LAYER_KHRONOS_validation".as_ptr());
            }

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_names);

            let instance = entry.create_instance(&create_info, None).map_err(|e| {
                engine_err!(InitializationFailed, SOURCE, "Failed to create instance: {:?}", e)
            })?;

            #[cfg(feature = "vulkan-validation")]
            let (debug_utils_loader, debug_messenger) = {
                let debug_utils = ash::ext::debug_utils::Instance::new(&entry, &instance);

                let debug_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
                    .message_severity(
                        vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING,
                    )
                    .message_type(
                        vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
                    )
                    .pfn_user_callback(Some(crate::vulkan_debug::vulkan_debug_callback));

                let messenger = debug_utils
                    .create_debug_utils_messenger(&debug_info, None)
                    .map_err(|e| {
                        engine_err!(InitializationFailed, SOURCE,
                            "Failed to create debug messenger: {:?}", e)
                    })?;

                (Some(debug_utils), Some(messenger))
            };

            // Pick Physical Device
            let physical_devices = instance.enumerate_physical_devices().map_err(|e| {
                engine_err!(InitializationFailed, SOURCE,
                    "Failed to enumerate physical devices: {:?}", e)
            })?;

            let physical_device = physical_devices.into_iter().next().ok_or_else(|| {
                engine_err!(InitializationFailed, SOURCE, "No Vulkan-capable GPU found")
            })?;

            // Find Queue Families
            let queue_families =
                instance.get_physical_device_queue_family_properties(physical_device);

            let graphics_family_index = queue_families
                .iter()
                .enumerate()
                .find(|(_, qf)| qf.queue_flags.contains(vk::QueueFlags::GRAPHICS))
                .map(|(i, _)| i as u32)
                .ok_or_else(|| {
                    engine_err!(InitializationFailed, SOURCE, "No graphics queue family found")
                })?;

            // Prefer a dedicated transfer family; fall back to the graphics one
            let transfer_family_index = queue_families
                .iter()
                .enumerate()
                .find(|(_, qf)| {
                    qf.queue_flags.contains(vk::QueueFlags::TRANSFER)
                        && !qf.queue_flags.contains(vk::QueueFlags::GRAPHICS)
                })
                .map(|(i, _)| i as u32)
                .unwrap_or(graphics_family_index);

            engine_info!(SOURCE,
                "Queue families: graphics={}, transfer={}",
                graphics_family_index, transfer_family_index);

            // Create Logical Device
            let queue_priorities = [1.0];
            let queue_create_infos = if graphics_family_index == transfer_family_index {
                vec![vk::DeviceQueueCreateInfo::default()
                    .queue_family_index(graphics_family_index)
                    .queue_priorities(&queue_priorities)]
            } else {
                vec![
                    vk::DeviceQueueCreateInfo::default()
                        .queue_family_index(graphics_family_index)
                        .queue_priorities(&queue_priorities),
                    vk::DeviceQueueCreateInfo::default()
                        .queue_family_index(transfer_family_index)
                        .queue_priorities(&queue_priorities),
                ]
            };

            let device_features = vk::PhysicalDeviceFeatures::default().sampler_anisotropy(true);

            let device_create_info = vk::DeviceCreateInfo::default()
                .queue_create_infos(&queue_create_infos)
                .enabled_features(&device_features);

            let device = instance
                .create_device(physical_device, &device_create_info, None)
                .map_err(|e| {
                    engine_err!(InitializationFailed, SOURCE, "Failed to create device: {:?}", e)
                })?;

            // Create GPU allocator
            let allocator = Allocator::new(&AllocatorCreateDesc {
                instance: instance.clone(),
                device: device.clone(),
                physical_device,
                debug_settings: Default::default(),
                buffer_device_address: false,
                allocation_sizes: Default::default(),
            })
            .map_err(|e| {
                engine_err!(InitializationFailed, SOURCE, "Failed to create allocator: {:?}", e)
            })?;

            // Both names map to the same VulkanQueue when the families collapse,
            // so the submit lock stays one-per-VkQueue.
            let graphics_queue = Arc::new(VulkanQueue {
                raw: device.get_device_queue(graphics_family_index, 0),
                family_index: graphics_family_index,
                submit_lock: Mutex::new(()),
            });
            let transfer_queue = if transfer_family_index == graphics_family_index {
                Arc::clone(&graphics_queue)
            } else {
                Arc::new(VulkanQueue {
                    raw: device.get_device_queue(transfer_family_index, 0),
                    family_index: transfer_family_index,
                    submit_lock: Mutex::new(()),
                })
            };

            let mut queues = FxHashMap::default();
            queues.insert(config.graphics_queue_name.clone(), graphics_queue);
            queues.insert(config.transfer_queue_name.clone(), transfer_queue);

            let ctx = Arc::new(GpuContext {
                device,
                allocator: ManuallyDrop::new(Arc::new(Mutex::new(allocator))),
                queues,
                instance,
                #[cfg(feature = "vulkan-validation")]
                debug_utils_loader,
                #[cfg(feature = "vulkan-validation")]
                debug_messenger,
            });

            Ok(Self { _entry: entry, ctx })
        }
    }
}

impl GraphicsDevice for VulkanDevice {
    fn create_image(&self, desc: &ImageDescription) -> Result<Arc<dyn GpuImage>> {
        unsafe {
            let format = format_to_vk(desc.format);

            let image_create_info = vk::ImageCreateInfo::default()
                .image_type(vk::ImageType::TYPE_2D)
                .format(format)
                .extent(vk::Extent3D {
                    width: desc.extent.width,
                    height: desc.extent.height,
                    depth: 1,
                })
                .mip_levels(desc.mip_levels)
                .array_layers(1)
                .samples(vk::SampleCountFlags::TYPE_1)
                .tiling(tiling_to_vk(desc.tiling))
                .usage(image_usage_to_vk(desc.usage))
                .sharing_mode(vk::SharingMode::EXCLUSIVE)
                .initial_layout(vk::ImageLayout::UNDEFINED);

            let image = self.ctx.device.create_image(&image_create_info, None).map_err(|e| {
                engine_err!(DeviceCall, SOURCE, "Failed to create image: {:?}", e)
            })?;

            let requirements = self.ctx.device.get_image_memory_requirements(image);

            let allocation = self
                .ctx
                .allocator
                .lock()
                .unwrap()
                .allocate(&gpu_allocator::vulkan::AllocationCreateDesc {
                    name: "image",
                    requirements,
                    location: memory_location(desc.properties),
                    linear: desc.tiling == ImageTiling::Linear,
                    allocation_scheme: gpu_allocator::vulkan::AllocationScheme::GpuAllocatorManaged,
                })
                .map_err(|_e| {
                    let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                    engine_error!(SOURCE,
                        "Out of GPU memory for image ({}x{}, {:.2} MB)",
                        desc.extent.width, desc.extent.height, size_mb);
                    self.ctx.device.destroy_image(image, None);
                    Error::OutOfMemory
                })?;

            if let Err(e) =
                self.ctx.device.bind_image_memory(image, allocation.memory(), allocation.offset())
            {
                self.ctx.allocator.lock().unwrap().free(allocation).ok();
                self.ctx.device.destroy_image(image, None);
                return Err(engine_err!(DeviceCall, SOURCE,
                    "Failed to bind image memory: {:?}", e));
            }

            let view_create_info = vk::ImageViewCreateInfo::default()
                .image(image)
                .view_type(vk::ImageViewType::TYPE_2D)
                .format(format)
                .components(vk::ComponentMapping {
                    r: vk::ComponentSwizzle::IDENTITY,
                    g: vk::ComponentSwizzle::IDENTITY,
                    b: vk::ComponentSwizzle::IDENTITY,
                    a: vk::ComponentSwizzle::IDENTITY,
                })
                .subresource_range(vk::ImageSubresourceRange {
                    aspect_mask: aspect_to_vk(desc.aspect),
                    base_mip_level: 0,
                    level_count: desc.mip_levels,
                    base_array_layer: 0,
                    layer_count: 1,
                });

            let view = match self.ctx.device.create_image_view(&view_create_info, None) {
                Ok(view) => view,
                Err(e) => {
                    self.ctx.allocator.lock().unwrap().free(allocation).ok();
                    self.ctx.device.destroy_image(image, None);
                    return Err(engine_err!(DeviceCall, SOURCE,
                        "Failed to create image view: {:?}", e));
                }
            };

            Ok(Arc::new(VulkanImage::new(
                Arc::clone(&self.ctx),
                image,
                view,
                allocation,
                desc.extent,
                desc.format,
                desc.aspect,
                desc.mip_levels,
            )))
        }
    }

    fn create_buffer(&self, desc: &BufferDescription) -> Result<Arc<dyn GpuBuffer>> {
        unsafe {
            let buffer_create_info = vk::BufferCreateInfo::default()
                .size(desc.size)
                .usage(buffer_usage_to_vk(desc.usage))
                .sharing_mode(vk::SharingMode::EXCLUSIVE);

            let buffer = self.ctx.device.create_buffer(&buffer_create_info, None).map_err(|e| {
                engine_err!(DeviceCall, SOURCE, "Failed to create buffer: {:?}", e)
            })?;

            let requirements = self.ctx.device.get_buffer_memory_requirements(buffer);

            let allocation = self
                .ctx
                .allocator
                .lock()
                .unwrap()
                .allocate(&gpu_allocator::vulkan::AllocationCreateDesc {
                    name: "buffer",
                    requirements,
                    location: memory_location(desc.properties),
                    linear: true,
                    allocation_scheme: gpu_allocator::vulkan::AllocationScheme::GpuAllocatorManaged,
                })
                .map_err(|_e| {
                    let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                    engine_error!(SOURCE, "Out of GPU memory for buffer ({:.2} MB)", size_mb);
                    self.ctx.device.destroy_buffer(buffer, None);
                    Error::OutOfMemory
                })?;

            if let Err(e) =
                self.ctx.device.bind_buffer_memory(buffer, allocation.memory(), allocation.offset())
            {
                self.ctx.allocator.lock().unwrap().free(allocation).ok();
                self.ctx.device.destroy_buffer(buffer, None);
                return Err(engine_err!(DeviceCall, SOURCE,
                    "Failed to bind buffer memory: {:?}", e));
            }

            Ok(Arc::new(VulkanBuffer::new(
                Arc::clone(&self.ctx),
                buffer,
                allocation,
                desc.size,
            )))
        }
    }

    fn create_render_pass(&self, desc: &RenderPassDescription) -> Result<Arc<dyn GpuRenderPass>> {
        unsafe {
            let attachments: Vec<vk::AttachmentDescription> = desc
                .attachments
                .iter()
                .map(|a| {
                    vk::AttachmentDescription::default()
                        .format(format_to_vk(a.format))
                        .samples(vk::SampleCountFlags::TYPE_1)
                        .load_op(load_op_to_vk(a.load_op))
                        .store_op(store_op_to_vk(a.store_op))
                        .stencil_load_op(load_op_to_vk(a.stencil_load_op))
                        .stencil_store_op(store_op_to_vk(a.stencil_store_op))
                        .initial_layout(image_layout_to_vk(a.initial_layout))
                        .final_layout(image_layout_to_vk(a.final_layout))
                })
                .collect();

            // Per-subpass reference arrays must outlive the SubpassDescriptions
            // that point into them.
            let subpass_refs: Vec<(Vec<vk::AttachmentReference>, Option<vk::AttachmentReference>)> =
                desc.subpasses
                    .iter()
                    .map(|sp| {
                        let colors = sp
                            .color_attachments
                            .iter()
                            .map(|r| {
                                vk::AttachmentReference::default()
                                    .attachment(r.attachment)
                                    .layout(image_layout_to_vk(r.layout))
                            })
                            .collect();
                        let depth = sp.depth_stencil_attachment.map(|r| {
                            vk::AttachmentReference::default()
                                .attachment(r.attachment)
                                .layout(image_layout_to_vk(r.layout))
                        });
                        (colors, depth)
                    })
                    .collect();

            let subpasses: Vec<vk::SubpassDescription> = desc
                .subpasses
                .iter()
                .zip(subpass_refs.iter())
                .map(|(sp, (colors, depth))| {
                    let mut subpass = vk::SubpassDescription::default()
                        .pipeline_bind_point(bind_point_to_vk(sp.bind_point))
                        .color_attachments(colors);
                    if let Some(depth_ref) = depth {
                        subpass = subpass.depth_stencil_attachment(depth_ref);
                    }
                    subpass
                })
                .collect();

            let dependencies: Vec<vk::SubpassDependency> = desc
                .dependencies
                .iter()
                .map(|d| {
                    vk::SubpassDependency::default()
                        .src_subpass(subpass_index_to_vk(d.src_subpass))
                        .dst_subpass(subpass_index_to_vk(d.dst_subpass))
                        .src_stage_mask(pipeline_stages_to_vk(d.src_stages))
                        .dst_stage_mask(pipeline_stages_to_vk(d.dst_stages))
                        .src_access_mask(access_to_vk(d.src_access))
                        .dst_access_mask(access_to_vk(d.dst_access))
                })
                .collect();

            let render_pass_info = vk::RenderPassCreateInfo::default()
                .attachments(&attachments)
                .subpasses(&subpasses)
                .dependencies(&dependencies);

            let render_pass = self
                .ctx
                .device
                .create_render_pass(&render_pass_info, None)
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to create render pass: {:?}", e)
                })?;

            Ok(Arc::new(VulkanRenderPass::new(Arc::clone(&self.ctx), render_pass)))
        }
    }

    fn create_framebuffer(&self, desc: &FramebufferDescription) -> Result<Arc<dyn GpuFramebuffer>> {
        unsafe {
            // Downcast render pass to Vulkan type
            let vk_render_pass =
                desc.render_pass.as_ref() as *const dyn GpuRenderPass as *const VulkanRenderPass;
            let vk_render_pass = &*vk_render_pass;

            // Collect image views in attachment-slot order
            let views: Vec<vk::ImageView> = desc
                .attachments
                .iter()
                .map(|image| {
                    let vk_image =
                        image.as_ref() as *const dyn GpuImage as *const VulkanImage;
                    (*vk_image).view
                })
                .collect();

            let framebuffer_info = vk::FramebufferCreateInfo::default()
                .render_pass(vk_render_pass.render_pass)
                .attachments(&views)
                .width(desc.extent.width)
                .height(desc.extent.height)
                .layers(1);

            let framebuffer = self
                .ctx
                .device
                .create_framebuffer(&framebuffer_info, None)
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to create framebuffer: {:?}", e)
                })?;

            Ok(Arc::new(VulkanFramebuffer::new(
                Arc::clone(&self.ctx),
                framebuffer,
                desc.extent,
            )))
        }
    }

    fn create_sampler(&self, desc: &SamplerDescription) -> Result<Arc<dyn GpuSampler>> {
        unsafe {
            let address_mode = address_mode_to_vk(desc.address_mode);
            let anisotropy_enable = desc.anisotropy >= 1.0;

            let sampler_info = vk::SamplerCreateInfo::default()
                .mag_filter(filter_to_vk(desc.mag_filter))
                .min_filter(filter_to_vk(desc.min_filter))
                .mipmap_mode(vk::SamplerMipmapMode::LINEAR)
                .address_mode_u(address_mode)
                .address_mode_v(address_mode)
                .address_mode_w(address_mode)
                .anisotropy_enable(anisotropy_enable)
                .max_anisotropy(if anisotropy_enable { desc.anisotropy } else { 1.0 })
                .border_color(border_color_to_vk(desc.border_color))
                .min_lod(0.0)
                .max_lod(vk::LOD_CLAMP_NONE);

            let sampler = self.ctx.device.create_sampler(&sampler_info, None).map_err(|e| {
                engine_err!(DeviceCall, SOURCE, "Failed to create sampler: {:?}", e)
            })?;

            Ok(Arc::new(VulkanSampler::new(Arc::clone(&self.ctx), sampler)))
        }
    }

    fn create_semaphore(&self) -> Result<Arc<dyn GpuSemaphore>> {
        unsafe {
            let semaphore = self
                .ctx
                .device
                .create_semaphore(&vk::SemaphoreCreateInfo::default(), None)
                .map_err(|e| {
                    engine_err!(DeviceCall, SOURCE, "Failed to create semaphore: {:?}", e)
                })?;

            Ok(Arc::new(VulkanSemaphore::new(Arc::clone(&self.ctx), semaphore)))
        }
    }

    fn create_command_list(&self, queue_name: &str) -> Result<Box<dyn GpuCommandList>> {
        let queue = self.ctx.queue(queue_name).ok_or_else(|| {
            engine_err!(NotFound, SOURCE, "Unknown queue '{}'", queue_name)
        })?;

        Ok(Box::new(VulkanCommandList::new(
            Arc::clone(&self.ctx),
            Arc::clone(queue),
        )?))
    }

    fn queue(&self, name: &str) -> Result<QueueInfo> {
        let queue = self.ctx.queue(name).ok_or_else(|| {
            engine_err!(NotFound, SOURCE, "Unknown queue '{}'", name)
        })?;

        Ok(QueueInfo {
            name: name.to_string(),
            family_index: queue.family_index,
        })
    }

    fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.ctx.device.device_wait_idle().map_err(|e| {
                engine_err!(DeviceCall, SOURCE, "Failed to wait for device idle: {:?}", e)
            })?;
        }
        Ok(())
    }
}

fn memory_location(properties: MemoryProperties) -> gpu_allocator::MemoryLocation {
    if properties.contains(MemoryProperties::HOST_VISIBLE) {
        gpu_allocator::MemoryLocation::CpuToGpu
    } else {
        gpu_allocator::MemoryLocation::GpuOnly
    }
}

fn subpass_index_to_vk(index: u32) -> u32 {
    if index == EXTERNAL_SUBPASS_INDEX {
        vk::SUBPASS_EXTERNAL
    } else {
        index
    }
}

pub(crate) fn format_to_vk(format: TextureFormat) -> vk::Format {
    match format {
        TextureFormat::R8G8B8A8_SRGB => vk::Format::R8G8B8A8_SRGB,
        TextureFormat::R8G8B8A8_UNORM => vk::Format::R8G8B8A8_UNORM,
        TextureFormat::B8G8R8A8_SRGB => vk::Format::B8G8R8A8_SRGB,
        TextureFormat::B8G8R8A8_UNORM => vk::Format::B8G8R8A8_UNORM,
        TextureFormat::D16_UNORM => vk::Format::D16_UNORM,
        TextureFormat::D32_SFLOAT => vk::Format::D32_SFLOAT,
        TextureFormat::D24_UNORM_S8_UINT => vk::Format::D24_UNORM_S8_UINT,
    }
}

pub(crate) fn image_layout_to_vk(layout: ImageLayout) -> vk::ImageLayout {
    match layout {
        ImageLayout::Undefined => vk::ImageLayout::UNDEFINED,
        ImageLayout::General => vk::ImageLayout::GENERAL,
        ImageLayout::ColorAttachmentOptimal => vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        ImageLayout::DepthStencilAttachmentOptimal => {
            vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL
        }
        ImageLayout::ShaderReadOnlyOptimal => vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
        ImageLayout::TransferSrcOptimal => vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
        ImageLayout::TransferDstOptimal => vk::ImageLayout::TRANSFER_DST_OPTIMAL,
    }
}

fn load_op_to_vk(op: AttachmentLoadOp) -> vk::AttachmentLoadOp {
    match op {
        AttachmentLoadOp::Load => vk::AttachmentLoadOp::LOAD,
        AttachmentLoadOp::Clear => vk::AttachmentLoadOp::CLEAR,
        AttachmentLoadOp::DontCare => vk::AttachmentLoadOp::DONT_CARE,
    }
}

fn store_op_to_vk(op: AttachmentStoreOp) -> vk::AttachmentStoreOp {
    match op {
        AttachmentStoreOp::Store => vk::AttachmentStoreOp::STORE,
        AttachmentStoreOp::DontCare => vk::AttachmentStoreOp::DONT_CARE,
    }
}

fn bind_point_to_vk(bind_point: PipelineBindPoint) -> vk::PipelineBindPoint {
    match bind_point {
        PipelineBindPoint::Graphics => vk::PipelineBindPoint::GRAPHICS,
        PipelineBindPoint::Compute => vk::PipelineBindPoint::COMPUTE,
    }
}

fn tiling_to_vk(tiling: ImageTiling) -> vk::ImageTiling {
    match tiling {
        ImageTiling::Optimal => vk::ImageTiling::OPTIMAL,
        ImageTiling::Linear => vk::ImageTiling::LINEAR,
    }
}

pub(crate) fn aspect_to_vk(aspect: ImageAspect) -> vk::ImageAspectFlags {
    let mut flags = vk::ImageAspectFlags::empty();
    if aspect.contains(ImageAspect::COLOR) {
        flags |= vk::ImageAspectFlags::COLOR;
    }
    if aspect.contains(ImageAspect::DEPTH) {
        flags |= vk::ImageAspectFlags::DEPTH;
    }
    if aspect.contains(ImageAspect::STENCIL) {
        flags |= vk::ImageAspectFlags::STENCIL;
    }
    flags
}

fn image_usage_to_vk(usage: ImageUsage) -> vk::ImageUsageFlags {
    let mut flags = vk::ImageUsageFlags::empty();
    if usage.contains(ImageUsage::TRANSFER_SRC) {
        flags |= vk::ImageUsageFlags::TRANSFER_SRC;
    }
    if usage.contains(ImageUsage::TRANSFER_DST) {
        flags |= vk::ImageUsageFlags::TRANSFER_DST;
    }
    if usage.contains(ImageUsage::SAMPLED) {
        flags |= vk::ImageUsageFlags::SAMPLED;
    }
    if usage.contains(ImageUsage::COLOR_ATTACHMENT) {
        flags |= vk::ImageUsageFlags::COLOR_ATTACHMENT;
    }
    if usage.contains(ImageUsage::DEPTH_STENCIL_ATTACHMENT) {
        flags |= vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT;
    }
    if usage.contains(ImageUsage::INPUT_ATTACHMENT) {
        flags |= vk::ImageUsageFlags::INPUT_ATTACHMENT;
    }
    flags
}

fn buffer_usage_to_vk(usage: BufferUsage) -> vk::BufferUsageFlags {
    let mut flags = vk::BufferUsageFlags::empty();
    if usage.contains(BufferUsage::TRANSFER_SRC) {
        flags |= vk::BufferUsageFlags::TRANSFER_SRC;
    }
    if usage.contains(BufferUsage::TRANSFER_DST) {
        flags |= vk::BufferUsageFlags::TRANSFER_DST;
    }
    if usage.contains(BufferUsage::UNIFORM) {
        flags |= vk::BufferUsageFlags::UNIFORM_BUFFER;
    }
    if usage.contains(BufferUsage::VERTEX) {
        flags |= vk::BufferUsageFlags::VERTEX_BUFFER;
    }
    if usage.contains(BufferUsage::INDEX) {
        flags |= vk::BufferUsageFlags::INDEX_BUFFER;
    }
    flags
}

fn filter_to_vk(filter: Filter) -> vk::Filter {
    match filter {
        Filter::Nearest => vk::Filter::NEAREST,
        Filter::Linear => vk::Filter::LINEAR,
    }
}

fn address_mode_to_vk(mode: AddressMode) -> vk::SamplerAddressMode {
    match mode {
        AddressMode::Repeat => vk::SamplerAddressMode::REPEAT,
        AddressMode::MirroredRepeat => vk::SamplerAddressMode::MIRRORED_REPEAT,
        AddressMode::ClampToEdge => vk::SamplerAddressMode::CLAMP_TO_EDGE,
        AddressMode::ClampToBorder => vk::SamplerAddressMode::CLAMP_TO_BORDER,
    }
}

fn border_color_to_vk(color: BorderColor) -> vk::BorderColor {
    match color {
        BorderColor::FloatTransparentBlack => vk::BorderColor::FLOAT_TRANSPARENT_BLACK,
        BorderColor::FloatOpaqueBlack => vk::BorderColor::FLOAT_OPAQUE_BLACK,
        BorderColor::FloatOpaqueWhite => vk::BorderColor::FLOAT_OPAQUE_WHITE,
        BorderColor::IntOpaqueBlack => vk::BorderColor::INT_OPAQUE_BLACK,
        BorderColor::IntOpaqueWhite => vk::BorderColor::INT_OPAQUE_WHITE,
    }
}

pub(crate) fn pipeline_stages_to_vk(stages: PipelineStages) -> vk::PipelineStageFlags {
    let mut flags = vk::PipelineStageFlags::empty();
    if stages.contains(PipelineStages::TOP_OF_PIPE) {
        flags |= vk::PipelineStageFlags::TOP_OF_PIPE;
    }
    if stages.contains(PipelineStages::TRANSFER) {
        flags |= vk::PipelineStageFlags::TRANSFER;
    }
    if stages.contains(PipelineStages::EARLY_FRAGMENT_TESTS) {
        flags |= vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS;
    }
    if stages.contains(PipelineStages::LATE_FRAGMENT_TESTS) {
        flags |= vk::PipelineStageFlags::LATE_FRAGMENT_TESTS;
    }
    if stages.contains(PipelineStages::FRAGMENT_SHADER) {
        flags |= vk::PipelineStageFlags::FRAGMENT_SHADER;
    }
    if stages.contains(PipelineStages::COLOR_ATTACHMENT_OUTPUT) {
        flags |= vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT;
    }
    if stages.contains(PipelineStages::BOTTOM_OF_PIPE) {
        flags |= vk::PipelineStageFlags::BOTTOM_OF_PIPE;
    }
    if stages.contains(PipelineStages::ALL_COMMANDS) {
        flags |= vk::PipelineStageFlags::ALL_COMMANDS;
    }
    flags
}

pub(crate) fn access_to_vk(access: Access) -> vk::AccessFlags {
    let mut flags = vk::AccessFlags::empty();
    if access.contains(Access::TRANSFER_READ) {
        flags |= vk::AccessFlags::TRANSFER_READ;
    }
    if access.contains(Access::TRANSFER_WRITE) {
        flags |= vk::AccessFlags::TRANSFER_WRITE;
    }
    if access.contains(Access::SHADER_READ) {
        flags |= vk::AccessFlags::SHADER_READ;
    }
    if access.contains(Access::COLOR_ATTACHMENT_READ) {
        flags |= vk::AccessFlags::COLOR_ATTACHMENT_READ;
    }
    if access.contains(Access::COLOR_ATTACHMENT_WRITE) {
        flags |= vk::AccessFlags::COLOR_ATTACHMENT_WRITE;
    }
    if access.contains(Access::DEPTH_STENCIL_ATTACHMENT_READ) {
        flags |= vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_READ;
    }
    if access.contains(Access::DEPTH_STENCIL_ATTACHMENT_WRITE) {
        flags |= vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE;
    }
    if access.contains(Access::MEMORY_READ) {
        flags |= vk::AccessFlags::MEMORY_READ;
    }
    flags
}

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod vulkan_format_tests;
