/*!
# Aurora 3D Engine - Vulkan Backend

Vulkan implementation of the aurora_3d_engine GraphicsDevice traits,
using the Ash library for Vulkan bindings and gpu-allocator for memory
management.

The device bootstraps headless (no surface or swapchain) with one named
graphics queue and one named transfer queue; a dedicated transfer family
is used when the hardware has one.
*/

mod vulkan_buffer;
mod vulkan_command_list;
mod vulkan_context;
mod vulkan_device;
mod vulkan_frame_buffer;
mod vulkan_image;
mod vulkan_render_pass;
mod vulkan_sampler;
mod vulkan_semaphore;

#[cfg(feature = "vulkan-validation")]
mod vulkan_debug;

pub use vulkan_device::{VulkanDevice, VulkanDeviceConfig};
