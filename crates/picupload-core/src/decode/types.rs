//! Core types for image decoding.

use thiserror::Error;

use crate::format::FormatTag;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The upload stream could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The bytes are not a valid image of the claimed format.
    #[error("Corrupted or invalid {format} data: {reason}")]
    Malformed { format: FormatTag, reason: String },

    /// The header declares a raster larger than the decode budget.
    #[error("{format} image too large to decode ({width}x{height})")]
    TooLarge {
        format: FormatTag,
        width: u32,
        height: u32,
    },
}

/// Largest width or height decoded or produced by a resize.
pub const MAX_DIMENSION: u32 = 16_384;

/// Largest raster, in pixels, decoded or produced by a resize.
pub const MAX_PIXELS: u64 = 40_000_000;

/// Whether a `width` x `height` raster stays inside the pixel budget.
pub(crate) fn fits_budget(width: u64, height: u64) -> bool {
    width <= u64::from(MAX_DIMENSION)
        && height <= u64::from(MAX_DIMENSION)
        && width * height <= MAX_PIXELS
}

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage, or `None` if the buffer does not match the dimensions.
    pub fn into_rgb_image(self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
