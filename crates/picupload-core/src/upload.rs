//! The upload pipeline: resolve extension, decode and resize, encode, store.

use std::io::Read;

use tracing::{debug, instrument, warn};

use crate::decode::DecoderRegistry;
use crate::encode::encode_jpeg;
use crate::error::UploadError;
use crate::format::ExtensionTable;
use crate::storage::StorageSink;

/// Quality every stored JPEG is encoded at.
pub const JPEG_QUALITY: u8 = 50;

/// Path returned to callers: `location + id + ".jpg"`.
pub fn stored_path(location: &str, id: &str) -> String {
    format!("{location}{id}.jpg")
}

/// Path handed to the sink, relative to the working directory.
pub fn write_path(location: &str, id: &str) -> String {
    format!(".{}", stored_path(location, id))
}

/// Transcodes uploaded images to JPEG and stores them.
///
/// Immutable once built, so one instance can serve concurrent uploads.
pub struct Uploader {
    extensions: ExtensionTable,
    decoders: DecoderRegistry,
    sink: Box<dyn StorageSink>,
}

impl Uploader {
    /// Build an uploader from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::MissingDecoder` if some extension resolves to a
    /// format without a registered decoder.
    pub fn new(
        extensions: ExtensionTable,
        decoders: DecoderRegistry,
        sink: impl StorageSink + 'static,
    ) -> Result<Self, UploadError> {
        if let Some(format) = extensions
            .formats()
            .into_iter()
            .find(|format| !decoders.contains(*format))
        {
            return Err(UploadError::MissingDecoder(format));
        }

        Ok(Self {
            extensions,
            decoders,
            sink: Box::new(sink),
        })
    }

    /// An uploader with the default extension table and decoders.
    pub fn with_sink(sink: impl StorageSink + 'static) -> Self {
        Self {
            extensions: ExtensionTable::with_defaults(),
            decoders: DecoderRegistry::with_defaults(),
            sink: Box::new(sink),
        }
    }

    /// Store `src` as `location + id + ".jpg"`, scaled to `width` (0 keeps the size).
    ///
    /// The format is picked from the extension of `filename`. Nothing is
    /// written unless decoding succeeds. If encoding fails after the
    /// destination was opened, the partial file is left in place.
    ///
    /// Returns the stored path.
    #[instrument(skip(self, src))]
    pub fn upload<R: Read>(
        &self,
        mut src: R,
        filename: &str,
        location: &str,
        id: &str,
        width: u32,
    ) -> Result<String, UploadError> {
        let Some(format) = self.extensions.resolve(filename) else {
            warn!("Rejected {}: unsupported extension", filename);
            return Err(UploadError::FileNotSupported);
        };
        let decoder = self
            .decoders
            .get(format)
            .ok_or(UploadError::MissingDecoder(format))?;

        let image = decoder.decode(&mut src, width).inspect_err(|e| {
            warn!("Failed to decode {} as {}: {}", filename, format, e);
        })?;
        debug!("Decoded {} as {}x{}", format, image.width, image.height);

        let path = write_path(location, id);
        let dst = self
            .sink
            .create(&path)
            .map_err(|source| UploadError::SinkCreate {
                path: path.clone(),
                source,
            })?;

        encode_jpeg(dst, &image.pixels, image.width, image.height, JPEG_QUALITY)?;
        debug!("Stored {}", path);

        Ok(stored_path(location, id))
    }
}
