//! Per-format decoders.
//!
//! Every decoder parses its own binary layout with the matching codec from the
//! `image` crate and shares the read → parse → resize sequence in
//! [`Decoder::decode`].

use std::io::{Cursor, Read};

use image::codecs::{bmp, gif, jpeg, png, tiff};
use image::{DynamicImage, ImageDecoder, ImageError, ImageResult, Limits};

use super::types::fits_budget;
use super::{resize_to_width, DecodeError, DecodedImage, MAX_DIMENSION, MAX_PIXELS};
use crate::error::UploadError;
use crate::format::FormatTag;

/// Turns the bytes of one image format into a raster.
pub trait Decoder: Send + Sync {
    /// The format this decoder understands.
    fn format(&self) -> FormatTag;

    /// Parse `bytes` as this decoder's format.
    fn decode_raster(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError>;

    /// Read `src` to the end, decode it and scale it to `width`.
    ///
    /// A width of `0` keeps the native dimensions. Parse failures return before
    /// any resizing happens.
    fn decode(&self, src: &mut dyn Read, width: u32) -> Result<DecodedImage, UploadError> {
        let mut bytes = Vec::new();
        src.read_to_end(&mut bytes)
            .map_err(|e| DecodeError::Io(e.to_string()))?;

        let raster = self.decode_raster(&bytes)?;
        let image = DecodedImage::from_rgb_image(raster.into_rgb8());

        Ok(resize_to_width(image, width)?)
    }
}

/// Limits handed to every codec; 8 bytes covers the widest color type decoded.
fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DIMENSION);
    limits.max_image_height = Some(MAX_DIMENSION);
    limits.max_alloc = Some(MAX_PIXELS * 8);
    limits
}

fn load<D: ImageDecoder>(
    format: FormatTag,
    decoder: ImageResult<D>,
) -> Result<DynamicImage, DecodeError> {
    let malformed = move |e: ImageError| DecodeError::Malformed {
        format,
        reason: e.to_string(),
    };

    let mut decoder = decoder.map_err(malformed)?;
    let (width, height) = decoder.dimensions();
    if !fits_budget(u64::from(width), u64::from(height)) {
        return Err(DecodeError::TooLarge {
            format,
            width,
            height,
        });
    }

    decoder.set_limits(decode_limits()).map_err(malformed)?;
    DynamicImage::from_decoder(decoder).map_err(malformed)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JpegDecoder;

impl Decoder for JpegDecoder {
    fn format(&self) -> FormatTag {
        FormatTag::Jpeg
    }

    fn decode_raster(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        load(self.format(), jpeg::JpegDecoder::new(Cursor::new(bytes)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PngDecoder;

impl Decoder for PngDecoder {
    fn format(&self) -> FormatTag {
        FormatTag::Png
    }

    fn decode_raster(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        load(self.format(), png::PngDecoder::new(Cursor::new(bytes)))
    }
}

/// Decodes the first frame of a GIF; animation is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GifDecoder;

impl Decoder for GifDecoder {
    fn format(&self) -> FormatTag {
        FormatTag::Gif
    }

    fn decode_raster(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        load(self.format(), gif::GifDecoder::new(Cursor::new(bytes)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BmpDecoder;

impl Decoder for BmpDecoder {
    fn format(&self) -> FormatTag {
        FormatTag::Bmp
    }

    fn decode_raster(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        load(self.format(), bmp::BmpDecoder::new(Cursor::new(bytes)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TiffDecoder;

impl Decoder for TiffDecoder {
    fn format(&self) -> FormatTag {
        FormatTag::Tiff
    }

    fn decode_raster(&self, bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
        load(self.format(), tiff::TiffDecoder::new(Cursor::new(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::encoded;
    use std::io;

    fn decoders() -> Vec<Box<dyn Decoder>> {
        vec![
            Box::new(JpegDecoder),
            Box::new(PngDecoder),
            Box::new(GifDecoder),
            Box::new(BmpDecoder),
            Box::new(TiffDecoder),
        ]
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
        }
    }

    #[test]
    fn test_each_decoder_keeps_native_size_at_zero_width() {
        for decoder in decoders() {
            let bytes = encoded(decoder.format(), 24, 16);
            let img = decoder.decode(&mut bytes.as_slice(), 0).unwrap();

            assert_eq!((img.width, img.height), (24, 16), "{}", decoder.format());
            assert_eq!(img.pixels.len(), 24 * 16 * 3);
        }
    }

    #[test]
    fn test_each_decoder_resizes_to_width() {
        for decoder in decoders() {
            let bytes = encoded(decoder.format(), 40, 20);
            let img = decoder.decode(&mut bytes.as_slice(), 10).unwrap();

            assert_eq!((img.width, img.height), (10, 5), "{}", decoder.format());
        }
    }

    #[test]
    fn test_garbage_is_malformed() {
        for decoder in decoders() {
            let result = decoder.decode(&mut &b"nop"[..], 100);

            match result {
                Err(UploadError::Decode(DecodeError::Malformed { format, .. })) => {
                    assert_eq!(format, decoder.format());
                }
                other => panic!("Expected Malformed error, got: {:?}", other),
            }
        }
    }

    #[test]
    fn test_empty_stream_is_malformed() {
        for decoder in decoders() {
            let result = decoder.decode(&mut io::empty(), 0);
            assert!(matches!(result, Err(UploadError::Decode(_))));
        }
    }

    #[test]
    fn test_mislabeled_bytes_are_rejected() {
        let png_bytes = encoded(FormatTag::Png, 8, 8);
        let result = JpegDecoder.decode(&mut png_bytes.as_slice(), 0);

        assert!(matches!(
            result,
            Err(UploadError::Decode(DecodeError::Malformed {
                format: FormatTag::Jpeg,
                ..
            }))
        ));
    }

    #[test]
    fn test_truncated_png() {
        let bytes = encoded(FormatTag::Png, 32, 32);
        let truncated = &bytes[..bytes.len() / 2];

        assert!(PngDecoder.decode(&mut &truncated[..], 0).is_err());
    }

    #[test]
    fn test_read_failure_is_io_error() {
        let result = PngDecoder.decode(&mut BrokenReader, 0);

        match result {
            Err(UploadError::Decode(DecodeError::Io(msg))) => {
                assert!(msg.contains("peer went away"));
            }
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }

    /// A 24-bit BMP header declaring `width` x `height` with no pixel data.
    fn bmp_header(width: i32, height: i32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"BM");
        bytes.extend_from_slice(&54u32.to_le_bytes()); // file size
        bytes.extend_from_slice(&0u32.to_le_bytes()); // reserved
        bytes.extend_from_slice(&54u32.to_le_bytes()); // pixel data offset
        bytes.extend_from_slice(&40u32.to_le_bytes()); // BITMAPINFOHEADER
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // planes
        bytes.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
        bytes.extend_from_slice(&[0u8; 24]); // compression .. important colors
        bytes
    }

    #[test]
    fn test_oversized_header_is_rejected_before_decoding() {
        let bytes = bmp_header(60_000, 60_000);
        let result = BmpDecoder.decode(&mut bytes.as_slice(), 0);

        assert!(matches!(
            result,
            Err(UploadError::Decode(DecodeError::TooLarge {
                format: FormatTag::Bmp,
                width: 60_000,
                height: 60_000
            }))
        ));
    }

    #[test]
    fn test_oversized_area_is_rejected() {
        // Each side fits MAX_DIMENSION, the area does not
        let bytes = bmp_header(16_000, 16_000);
        let result = BmpDecoder.decode_raster(&bytes);

        assert!(matches!(result, Err(DecodeError::TooLarge { .. })));
    }

    #[test]
    fn test_header_within_budget_is_not_too_large() {
        // Passes the budget, then fails on the missing pixel data
        let bytes = bmp_header(64, 64);
        let result = BmpDecoder.decode_raster(&bytes);

        assert!(matches!(result, Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn test_decode_raster_keeps_native_raster() {
        let bytes = encoded(FormatTag::Bmp, 5, 3);
        let raster = BmpDecoder.decode_raster(&bytes).unwrap();

        assert_eq!((raster.width(), raster.height()), (5, 3));
    }
}
