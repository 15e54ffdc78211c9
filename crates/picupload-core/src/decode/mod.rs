//! Image decoding for uploads.
//!
//! This module provides:
//! - One decoder per supported format behind the [`Decoder`] trait
//! - A [`DecoderRegistry`] mapping format tags to decoders
//! - Width-driven resizing that preserves aspect ratio
//! - A shared pixel budget for decoded and resized rasters
//!
//! # Examples
//!
//! ```ignore
//! use picupload_core::decode::DecoderRegistry;
//! use picupload_core::FormatTag;
//!
//! let registry = DecoderRegistry::with_defaults();
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = registry.get(FormatTag::Png).unwrap().decode(&mut bytes.as_slice(), 320).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod codecs;
mod registry;
mod resize;
mod types;

pub use codecs::{BmpDecoder, Decoder, GifDecoder, JpegDecoder, PngDecoder, TiffDecoder};
pub use registry::DecoderRegistry;
pub use resize::{resize_to_width, ResizeError};
pub use types::{DecodeError, DecodedImage, MAX_DIMENSION, MAX_PIXELS};
