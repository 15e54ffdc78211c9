//! Format-tag to decoder lookup.

use std::collections::HashMap;
use std::fmt;

use super::codecs::{BmpDecoder, Decoder, GifDecoder, JpegDecoder, PngDecoder, TiffDecoder};
use crate::format::FormatTag;

/// Holds one decoder per format tag.
///
/// New formats are supported by registering a decoder here and adding its
/// extensions to the [`ExtensionTable`](crate::format::ExtensionTable).
#[derive(Default)]
pub struct DecoderRegistry {
    decoders: HashMap<FormatTag, Box<dyn Decoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a decoder for every [`FormatTag`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JpegDecoder);
        registry.register(PngDecoder);
        registry.register(GifDecoder);
        registry.register(BmpDecoder);
        registry.register(TiffDecoder);
        registry
    }

    /// Registers `decoder` under its own format, replacing any previous one.
    pub fn register(&mut self, decoder: impl Decoder + 'static) {
        self.decoders.insert(decoder.format(), Box::new(decoder));
    }

    pub fn get(&self, format: FormatTag) -> Option<&dyn Decoder> {
        self.decoders.get(&format).map(|decoder| decoder.as_ref())
    }

    pub fn contains(&self, format: FormatTag) -> bool {
        self.decoders.contains_key(&format)
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<_> = self.decoders.keys().collect();
        formats.sort();
        f.debug_struct("DecoderRegistry")
            .field("formats", &formats)
            .finish()
    }
}
