//! Pixel decoding - file bytes to tightly packed RGBA8

use std::path::Path;

use crate::engine_err;
use crate::error::Result;
use crate::graphics_device::Extent2d;

const SOURCE: &str = "aurora3d::ImageFileDecoder";

/// A decoded image: tightly packed RGBA8 pixels, row-major, no padding
pub struct DecodedImage {
    pub extent: Extent2d,
    /// `extent.pixel_count() * 4` bytes
    pub pixels: Vec<u8>,
}

/// Decodes an image file into RGBA8 pixels
///
/// Implemented by [`ImageFileDecoder`] for real files; tests substitute
/// their own decoders to feed synthetic pixels through the upload pipeline.
pub trait PixelDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<DecodedImage>;
}

/// Default decoder backed by the `image` crate (PNG and JPEG)
pub struct ImageFileDecoder;

impl PixelDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage> {
        let decoded = image::open(path).map_err(|e| {
            engine_err!(Decode, SOURCE, "failed to decode '{}': {}", path.display(), e)
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(DecodedImage {
            extent: Extent2d::new(width, height),
            pixels: rgba.into_raw(),
        })
    }
}
