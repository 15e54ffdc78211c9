//! picupload core - image upload transcoding
//!
//! This crate turns an uploaded image into a stored JPEG:
//! the filename extension picks a decoder, the decoded raster is scaled to a
//! requested width, and the result is encoded at a fixed quality into a
//! [`StorageSink`].
//!
//! # Module Structure
//!
//! - `format` - Format tags and the extension table
//! - `decode` - Per-format decoders, the decoder registry, resizing
//! - `encode` - JPEG encoding
//! - `storage` - Filesystem and discarding sinks
//! - `upload` - The [`Uploader`] that drives the pipeline

pub mod decode;
pub mod encode;
mod error;
pub mod format;
pub mod storage;
pub mod upload;

#[cfg(test)]
mod fixtures;

pub use decode::{DecodeError, DecodedImage, Decoder, DecoderRegistry, ResizeError};
pub use encode::EncodeError;
pub use error::UploadError;
pub use format::{extension_of, ExtensionTable, FormatTag};
pub use storage::{DiscardSink, FsSink, StorageSink};
pub use upload::{stored_path, write_path, Uploader, JPEG_QUALITY};
