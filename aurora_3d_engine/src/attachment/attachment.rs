//! Attachment - a named GPU image used as a render pass input/output

use std::sync::Arc;

use crate::graphics_device::{Extent2d, GpuImage, ImageAspect, TextureFormat};

/// A named render-target image
///
/// Owns a GPU image (image + view + exclusively owned memory, behind the
/// [`GpuImage`] handle), created eagerly by the [`AttachmentRegistry`] and
/// destroyed when the last handle is dropped after deletion.
///
/// [`AttachmentRegistry`]: crate::attachment::AttachmentRegistry
pub struct Attachment {
    name: String,
    image: Arc<dyn GpuImage>,
    extent: Extent2d,
    format: TextureFormat,
    aspect: ImageAspect,
}

impl Attachment {
    pub(crate) fn new(
        name: String,
        image: Arc<dyn GpuImage>,
        extent: Extent2d,
        format: TextureFormat,
        aspect: ImageAspect,
    ) -> Self {
        Self {
            name,
            image,
            extent,
            format,
            aspect,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying GPU image handle (image + view + memory)
    pub fn image(&self) -> &Arc<dyn GpuImage> {
        &self.image
    }

    pub fn extent(&self) -> Extent2d {
        self.extent
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn aspect(&self) -> ImageAspect {
        self.aspect
    }
}
