//! Width-driven image resizing.
//!
//! Uploads are scaled to a requested width; the height always follows from the
//! source aspect ratio. A target width of zero leaves the image untouched.

use image::imageops::FilterType;
use thiserror::Error;

use super::types::fits_budget;
use super::DecodedImage;

/// Errors that can occur while resizing a decoded image.
#[derive(Debug, Error)]
pub enum ResizeError {
    /// The source has a zero dimension, so no aspect ratio exists.
    #[error("Cannot resize empty image ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    /// The pixel buffer does not match the declared dimensions.
    #[error("Pixel buffer does not match image dimensions")]
    InvalidBuffer,

    /// The target raster exceeds the pixel budget.
    #[error("Target size {width}x{height} is too large")]
    TooLarge { width: u32, height: u64 },
}

/// Resize an image to `width` with Lanczos3, deriving the height from its
/// aspect ratio.
///
/// # Arguments
///
/// * `image` - The source image, consumed
/// * `width` - Target width in pixels; `0` means "do not resize"
///
/// # Errors
///
/// Returns `ResizeError::EmptySource` if the source has a zero dimension,
/// `ResizeError::TooLarge` if the target exceeds [`MAX_DIMENSION`] or
/// [`MAX_PIXELS`], and `ResizeError::InvalidBuffer` if the pixel data is
/// inconsistent.
///
/// [`MAX_DIMENSION`]: super::MAX_DIMENSION
/// [`MAX_PIXELS`]: super::MAX_PIXELS
pub fn resize_to_width(image: DecodedImage, width: u32) -> Result<DecodedImage, ResizeError> {
    if width == 0 {
        return Ok(image);
    }

    if image.is_empty() {
        return Err(ResizeError::EmptySource {
            width: image.width,
            height: image.height,
        });
    }

    let height = derived_height(image.width, image.height, width);
    if !fits_budget(u64::from(width), height) {
        return Err(ResizeError::TooLarge { width, height });
    }
    // Bounded by MAX_DIMENSION
    let height = height as u32;

    // Fast path: nothing to scale
    if image.width == width && image.height == height {
        return Ok(image);
    }

    let rgb_image = image.into_rgb_image().ok_or(ResizeError::InvalidBuffer)?;
    let resized = image::imageops::resize(&rgb_image, width, height, FilterType::Lanczos3);

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Height that keeps `src_width:src_height` when the width becomes `width`.
fn derived_height(src_width: u32, src_height: u32, width: u32) -> u64 {
    let height = (src_height as f64 * width as f64 / src_width as f64).round();
    (height as u64).max(1)
}
