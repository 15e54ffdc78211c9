//! Test images encoded on the fly with the `image` crate's encoders.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{DynamicImage, Frame, ImageFormat, RgbImage};

use crate::format::FormatTag;

pub(crate) fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            128,
        ])
    })
}

/// A `width` x `height` gradient encoded as `format`.
pub(crate) fn encoded(format: FormatTag, width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(gradient(width, height));
    let mut bytes = Vec::new();

    let format = match format {
        FormatTag::Gif => {
            {
                let mut encoder = GifEncoder::new(&mut bytes);
                encoder
                    .encode_frame(Frame::new(image.into_rgba8()))
                    .unwrap();
            }
            return bytes;
        }
        FormatTag::Jpeg => ImageFormat::Jpeg,
        FormatTag::Png => ImageFormat::Png,
        FormatTag::Bmp => ImageFormat::Bmp,
        FormatTag::Tiff => ImageFormat::Tiff,
    };

    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}
