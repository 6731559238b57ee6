/// GpuContext - Shared GPU resources for all Vulkan objects
///
/// Contains everything needed for GPU operations:
/// - Device for Vulkan API calls
/// - Allocator for memory management
/// - Named queues for command submission

use ash::vk;
use gpu_allocator::vulkan::Allocator;
use rustc_hash::FxHashMap;
use std::mem::ManuallyDrop;
use std::sync::{Arc, Mutex};

/// One logical device queue plus its submission lock
///
/// vkQueueSubmit requires external synchronization per queue; every submit
/// against this queue goes through `submit_lock`.
pub struct VulkanQueue {
    pub raw: vk::Queue,
    pub family_index: u32,
    pub submit_lock: Mutex<()>,
}

/// Shared GPU context for all Vulkan resources.
///
/// This struct is shared (via `Arc`) by all GPU resources (images, buffers,
/// command lists, etc.) to avoid duplicating device/allocator/queue
/// references in each resource. Dropping the last `Arc` tears the device
/// down in reverse creation order; resources keep the context alive, so the
/// device outlives everything created from it.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// GPU memory allocator (shared, requires mutex for thread safety)
    /// Wrapped in ManuallyDrop so it is dropped BEFORE the device is destroyed
    pub allocator: ManuallyDrop<Arc<Mutex<Allocator>>>,

    /// Named queues ("GraphicsQueue", "TransferQueue", ...)
    pub queues: FxHashMap<String, Arc<VulkanQueue>>,

    /// Vulkan instance (destroyed last)
    pub(crate) instance: ash::Instance,

    /// Debug utils loader (validation builds only)
    #[cfg(feature = "vulkan-validation")]
    pub(crate) debug_utils_loader: Option<ash::ext::debug_utils::Instance>,

    /// Debug messenger handle
    #[cfg(feature = "vulkan-validation")]
    pub(crate) debug_messenger: Option<vk::DebugUtilsMessengerEXT>,
}

impl GpuContext {
    /// Named queue lookup
    pub fn queue(&self, name: &str) -> Option<&Arc<VulkanQueue>> {
        self.queues.get(name)
    }
}

impl Drop for GpuContext {
    fn drop(&mut self) {
        unsafe {
            // Every resource holds an Arc to this context, so by now the
            // device is idle and nothing allocated from it is left.
            let _ = self.device.device_wait_idle();

            // Allocator must go before the device it allocates from
            ManuallyDrop::drop(&mut self.allocator);

            self.device.destroy_device(None);

            #[cfg(feature = "vulkan-validation")]
            if let (Some(loader), Some(messenger)) =
                (&self.debug_utils_loader, self.debug_messenger)
            {
                loader.destroy_debug_utils_messenger(messenger, None);
            }

            self.instance.destroy_instance(None);
        }
    }
}
