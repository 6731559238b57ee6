//! Value types shared between the core registries and the GPU backends

use std::sync::Arc;
use bitflags::bitflags;

use super::graphics_device::{GpuBuffer, GpuImage, GpuRenderPass};

/// Queue family sentinel: barrier does not transfer ownership
pub const QUEUE_FAMILY_IGNORED: u32 = u32::MAX;

/// Subpass index sentinel: the pipeline stages outside any subpass
pub const EXTERNAL_SUBPASS_INDEX: u32 = u32::MAX;

/// 2D extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent2d {
    pub width: u32,
    pub height: u32,
}

impl Extent2d {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count, as u64 to survive large targets
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Texture/attachment pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    D16_UNORM,
    D32_SFLOAT,
    D24_UNORM_S8_UINT,
}

impl TextureFormat {
    /// Bytes per pixel (used to size staging buffers)
    pub fn bytes_per_pixel(&self) -> u64 {
        match self {
            TextureFormat::R8G8B8A8_SRGB
            | TextureFormat::R8G8B8A8_UNORM
            | TextureFormat::B8G8R8A8_SRGB
            | TextureFormat::B8G8R8A8_UNORM
            | TextureFormat::D32_SFLOAT
            | TextureFormat::D24_UNORM_S8_UINT => 4,
            TextureFormat::D16_UNORM => 2,
        }
    }

    /// Whether this is a depth or depth/stencil format
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM | TextureFormat::D32_SFLOAT | TextureFormat::D24_UNORM_S8_UINT
        )
    }
}

bitflags! {
    /// Image usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageUsage: u32 {
        const TRANSFER_SRC = 1 << 0;
        const TRANSFER_DST = 1 << 1;
        const SAMPLED = 1 << 2;
        const COLOR_ATTACHMENT = 1 << 3;
        const DEPTH_STENCIL_ATTACHMENT = 1 << 4;
        const INPUT_ATTACHMENT = 1 << 5;
    }
}

bitflags! {
    /// Buffer usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        const TRANSFER_SRC = 1 << 0;
        const TRANSFER_DST = 1 << 1;
        const UNIFORM = 1 << 2;
        const VERTEX = 1 << 3;
        const INDEX = 1 << 4;
    }
}

bitflags! {
    /// Memory property flags for backing allocations
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemoryProperties: u32 {
        const DEVICE_LOCAL = 1 << 0;
        const HOST_VISIBLE = 1 << 1;
        const HOST_COHERENT = 1 << 2;
    }
}

bitflags! {
    /// Image aspect flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ImageAspect: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

bitflags! {
    /// Pipeline stage flags for barriers and semaphore waits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PipelineStages: u32 {
        const TOP_OF_PIPE = 1 << 0;
        const TRANSFER = 1 << 1;
        const EARLY_FRAGMENT_TESTS = 1 << 2;
        const LATE_FRAGMENT_TESTS = 1 << 3;
        const FRAGMENT_SHADER = 1 << 4;
        const COLOR_ATTACHMENT_OUTPUT = 1 << 5;
        const BOTTOM_OF_PIPE = 1 << 6;
        const ALL_COMMANDS = 1 << 7;
    }
}

bitflags! {
    /// Memory access flags for barriers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Access: u32 {
        const TRANSFER_READ = 1 << 0;
        const TRANSFER_WRITE = 1 << 1;
        const SHADER_READ = 1 << 2;
        const COLOR_ATTACHMENT_READ = 1 << 3;
        const COLOR_ATTACHMENT_WRITE = 1 << 4;
        const DEPTH_STENCIL_ATTACHMENT_READ = 1 << 5;
        const DEPTH_STENCIL_ATTACHMENT_WRITE = 1 << 6;
        const MEMORY_READ = 1 << 7;
    }
}

/// Image memory layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLayout {
    Undefined,
    General,
    ColorAttachmentOptimal,
    DepthStencilAttachmentOptimal,
    ShaderReadOnlyOptimal,
    TransferSrcOptimal,
    TransferDstOptimal,
}

/// What happens to an attachment's contents when a render pass begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentLoadOp {
    Load,
    Clear,
    DontCare,
}

/// What happens to an attachment's contents when a render pass ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentStoreOp {
    Store,
    DontCare,
}

/// Pipeline kind a subpass binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineBindPoint {
    Graphics,
    Compute,
}

/// Image tiling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTiling {
    Optimal,
    Linear,
}

/// Subresource range an image view / barrier covers
///
/// Both halves of a queue ownership transfer must name the identical range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubresourceRange {
    pub aspect: ImageAspect,
    pub base_mip_level: u32,
    pub level_count: u32,
    pub base_array_layer: u32,
    pub layer_count: u32,
}

impl SubresourceRange {
    /// Single-mip, single-layer range for the given aspect
    pub fn base(aspect: ImageAspect) -> Self {
        Self {
            aspect,
            base_mip_level: 0,
            level_count: 1,
            base_array_layer: 0,
            layer_count: 1,
        }
    }
}

// ===== BARRIERS =====

/// Global memory barrier
#[derive(Debug, Clone, Copy)]
pub struct MemoryBarrier {
    pub src_access: Access,
    pub dst_access: Access,
}

/// Buffer memory barrier, optionally transferring queue family ownership
#[derive(Clone)]
pub struct BufferBarrier {
    pub buffer: Arc<dyn GpuBuffer>,
    pub src_access: Access,
    pub dst_access: Access,
    pub src_queue_family: u32,
    pub dst_queue_family: u32,
    pub offset: u64,
    pub size: u64,
}

/// Image memory barrier, optionally transitioning layout and/or
/// transferring queue family ownership
#[derive(Clone)]
pub struct ImageBarrier {
    pub image: Arc<dyn GpuImage>,
    pub old_layout: ImageLayout,
    pub new_layout: ImageLayout,
    pub src_access: Access,
    pub dst_access: Access,
    pub src_queue_family: u32,
    pub dst_queue_family: u32,
    pub subresource_range: SubresourceRange,
}

// ===== RESOURCE DESCRIPTIONS =====

/// Descriptor for creating a GPU image (+ view + backing memory)
#[derive(Debug, Clone, Copy)]
pub struct ImageDescription {
    pub extent: Extent2d,
    pub format: TextureFormat,
    pub tiling: ImageTiling,
    pub usage: ImageUsage,
    pub properties: MemoryProperties,
    pub aspect: ImageAspect,
    pub mip_levels: u32,
}

/// Descriptor for creating a GPU buffer
#[derive(Debug, Clone, Copy)]
pub struct BufferDescription {
    pub size: u64,
    pub usage: BufferUsage,
    pub properties: MemoryProperties,
}

/// Compiled, ordered, index-resolved render pass description
///
/// Produced by the render pass builder; consumed by the backend. Indices in
/// subpass/dependency entries refer to positions in `attachments`/`subpasses`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPassDescription {
    pub attachments: Vec<AttachmentDescription>,
    pub subpasses: Vec<SubpassDescription>,
    pub dependencies: Vec<DependencyDescription>,
}

/// One attachment slot of a compiled render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentDescription {
    pub format: TextureFormat,
    pub load_op: AttachmentLoadOp,
    pub store_op: AttachmentStoreOp,
    pub stencil_load_op: AttachmentLoadOp,
    pub stencil_store_op: AttachmentStoreOp,
    pub initial_layout: ImageLayout,
    pub final_layout: ImageLayout,
}

/// Reference from a subpass to an attachment slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentReference {
    pub attachment: u32,
    pub layout: ImageLayout,
}

/// One subpass of a compiled render pass
#[derive(Debug, Clone, PartialEq)]
pub struct SubpassDescription {
    pub bind_point: PipelineBindPoint,
    pub color_attachments: Vec<AttachmentReference>,
    pub depth_stencil_attachment: Option<AttachmentReference>,
}

/// Execution/memory dependency between two subpasses
/// (`EXTERNAL_SUBPASS_INDEX` denotes the outside of the pass)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DependencyDescription {
    pub src_subpass: u32,
    pub dst_subpass: u32,
    pub src_stages: PipelineStages,
    pub dst_stages: PipelineStages,
    pub src_access: Access,
    pub dst_access: Access,
}

/// Descriptor for creating a framebuffer
#[derive(Clone)]
pub struct FramebufferDescription {
    pub render_pass: Arc<dyn GpuRenderPass>,
    /// Views bound to the render pass slots, in attachment-index order
    pub attachments: Vec<Arc<dyn GpuImage>>,
    pub extent: Extent2d,
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Nearest,
    Linear,
}

/// Sampler addressing mode outside [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

/// Border color for `AddressMode::ClampToBorder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderColor {
    FloatTransparentBlack,
    FloatOpaqueBlack,
    FloatOpaqueWhite,
    IntOpaqueBlack,
    IntOpaqueWhite,
}

/// Descriptor for creating a sampler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDescription {
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub address_mode: AddressMode,
    /// Anisotropy is disabled below 1.0
    pub anisotropy: f32,
    pub border_color: BorderColor,
}

impl Default for SamplerDescription {
    fn default() -> Self {
        Self {
            mag_filter: Filter::Linear,
            min_filter: Filter::Linear,
            address_mode: AddressMode::Repeat,
            anisotropy: 0.0,
            border_color: BorderColor::FloatOpaqueBlack,
        }
    }
}

/// How a command list recording will be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandListUsage {
    OneTimeSubmit,
    Reusable,
}

/// Identity of a named device queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueInfo {
    pub name: String,
    pub family_index: u32,
}
