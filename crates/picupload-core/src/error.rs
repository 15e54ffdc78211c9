use std::io;

use thiserror::Error;

use crate::decode::{DecodeError, ResizeError};
use crate::encode::EncodeError;
use crate::format::FormatTag;

/// Everything that can stop an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The filename extension is not in the extension table.
    #[error("file is not an image")]
    FileNotSupported,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Resize(#[from] ResizeError),

    #[error("Failed to create {path}: {source}")]
    SinkCreate {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The extension table yields a format the registry cannot decode.
    #[error("No decoder registered for {0}")]
    MissingDecoder(FormatTag),
}
