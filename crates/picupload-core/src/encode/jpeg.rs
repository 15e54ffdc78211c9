//! JPEG encoding for stored uploads.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder,
//! writing directly into any [`Write`] destination.

use std::io::{self, BufWriter, Write};

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The destination rejected the final flush
    #[error("Failed to flush encoded data: {0}")]
    Io(#[from] io::Error),
}

/// Encode RGB pixel data as JPEG into `writer`.
///
/// # Arguments
///
/// * `writer` - Destination for the encoded bytes
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// Output is buffered and flushed before returning. On error, whatever was
/// already written stays in `writer`.
///
/// # Example
///
/// ```ignore
/// use picupload_core::encode::encode_jpeg;
///
/// let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
/// let mut jpeg = Vec::new();
/// encode_jpeg(&mut jpeg, &pixels, 100, 100, 50).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg<W: Write>(
    writer: W,
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = BufWriter::new(writer);
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    buffer.flush()?;
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::{Decoder, JpegDecoder};
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=50, 1u32..=50)
    }

    proptest! {
        /// Property: encoding at quality 50 then decoding yields the same dimensions.
        #[test]
        fn prop_round_trip_dimensions((width, height) in dimensions_strategy(), seed in any::<u8>()) {
            let size = (width as usize) * (height as usize) * 3;
            let pixels: Vec<u8> = (0..size).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();

            let mut jpeg = Vec::new();
            encode_jpeg(&mut jpeg, &pixels, width, height, 50).unwrap();

            let decoded = JpegDecoder.decode(&mut jpeg.as_slice(), 0).unwrap();
            prop_assert_eq!((decoded.width, decoded.height), (width, height));
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output((width, height) in (1u32..=20, 1u32..=20)) {
            let pixels = vec![100u8; (width as usize) * (height as usize) * 3];

            let mut first = Vec::new();
            let mut second = Vec::new();
            encode_jpeg(&mut first, &pixels, width, height, 50).unwrap();
            encode_jpeg(&mut second, &pixels, width, height, 50).unwrap();

            prop_assert_eq!(first, second, "Same input should produce same output");
        }

        /// Property: Zero dimensions always return error.
        #[test]
        fn prop_zero_dimensions_return_error(width in 0u32..=1, height in 0u32..=1) {
            prop_assume!(width == 0 || height == 0);

            let result = encode_jpeg(Vec::new(), &[], width, height, 50);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidDimensions { .. })),
                "zero dimensions {}x{} must be rejected",
                width,
                height
            );
        }
    }
}
