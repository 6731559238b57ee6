//! Texture2d - a sampled GPU texture with its shader-visible info block

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::graphics_device::{
    AddressMode, BorderColor, Extent2d, Filter, GpuBuffer, GpuImage, GpuSampler, TextureFormat,
};

/// How a texture is created and sampled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSettings {
    pub format: TextureFormat,
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub address_mode: AddressMode,
    /// Anisotropy is disabled below 1.0
    pub anisotropy: f32,
    pub border_color: BorderColor,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            format: TextureFormat::R8G8B8A8_SRGB,
            mag_filter: Filter::Linear,
            min_filter: Filter::Linear,
            address_mode: AddressMode::Repeat,
            anisotropy: 0.0,
            border_color: BorderColor::FloatOpaqueBlack,
        }
    }
}

/// Shader-visible texture metadata, uploaded next to the pixels
///
/// std140-compatible: two vec4s, 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextureInfo {
    /// (1/width, 1/height, width, height)
    pub size: Vec4,
    /// (offset.x, offset.y, scale.x, scale.y)
    pub tiling_scale: Vec4,
}

impl TextureInfo {
    pub(crate) fn new(extent: Extent2d) -> Self {
        let width = extent.width as f32;
        let height = extent.height as f32;
        Self {
            size: Vec4::new(1.0 / width, 1.0 / height, width, height),
            tiling_scale: Vec4::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

/// A fully uploaded 2D texture
///
/// Produced by the [`AssetLoader`](crate::asset::AssetLoader); by the time a
/// handle is published the image is in shader-read-only layout, owned by the
/// destination queue family, with the sampler and info buffer ready to bind.
pub struct Texture2d {
    extent: Extent2d,
    settings: TextureSettings,
    info: TextureInfo,
    image: Arc<dyn GpuImage>,
    sampler: Arc<dyn GpuSampler>,
    info_buffer: Arc<dyn GpuBuffer>,
}

impl Texture2d {
    pub(crate) fn new(
        extent: Extent2d,
        settings: TextureSettings,
        info: TextureInfo,
        image: Arc<dyn GpuImage>,
        sampler: Arc<dyn GpuSampler>,
        info_buffer: Arc<dyn GpuBuffer>,
    ) -> Self {
        Self {
            extent,
            settings,
            info,
            image,
            sampler,
            info_buffer,
        }
    }

    pub fn extent(&self) -> Extent2d {
        self.extent
    }

    pub fn settings(&self) -> &TextureSettings {
        &self.settings
    }

    pub fn info(&self) -> &TextureInfo {
        &self.info
    }

    pub fn image(&self) -> &Arc<dyn GpuImage> {
        &self.image
    }

    pub fn sampler(&self) -> &Arc<dyn GpuSampler> {
        &self.sampler
    }

    /// Device-local uniform buffer holding [`TextureInfo`]
    pub fn info_buffer(&self) -> &Arc<dyn GpuBuffer> {
        &self.info_buffer
    }
}
