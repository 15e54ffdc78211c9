//! Format tags and filename-extension resolution.

use std::collections::HashMap;
use std::fmt;

/// Image encodings an upload can arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatTag {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
}

impl FormatTag {
    pub const ALL: [FormatTag; 5] = [
        FormatTag::Jpeg,
        FormatTag::Png,
        FormatTag::Gif,
        FormatTag::Bmp,
        FormatTag::Tiff,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatTag::Jpeg => "jpeg",
            FormatTag::Png => "png",
            FormatTag::Gif => "gif",
            FormatTag::Bmp => "bmp",
            FormatTag::Tiff => "tiff",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns everything after the last `.` in `filename`.
///
/// A filename without a period is returned whole, and a trailing period yields
/// an empty extension.
pub fn extension_of(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => filename,
    }
}

/// Maps extension tokens to format tags.
///
/// Matching is exact: only the case variants that were inserted resolve, so
/// `"Jpg"` fails even though `"jpg"` and `"JPG"` are known.
#[derive(Debug, Clone, Default)]
pub struct ExtensionTable {
    entries: HashMap<String, FormatTag>,
}

impl ExtensionTable {
    /// An empty table. Nothing resolves until entries are inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table of every supported format with its common spellings.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();

        for token in ["jpeg", "jpg", "JPG", "JPEG"] {
            table.insert(token, FormatTag::Jpeg);
        }
        for token in ["png", "PNG"] {
            table.insert(token, FormatTag::Png);
        }
        for token in ["gif", "GIF"] {
            table.insert(token, FormatTag::Gif);
        }
        for token in ["bmp", "BMP"] {
            table.insert(token, FormatTag::Bmp);
        }
        for token in ["tiff", "tif", "TIFF", "TIF"] {
            table.insert(token, FormatTag::Tiff);
        }

        table
    }

    /// Registers `token`, replacing any previous mapping for it.
    pub fn insert(&mut self, token: impl Into<String>, format: FormatTag) {
        self.entries.insert(token.into(), format);
    }

    /// Looks up an extension token exactly as given.
    pub fn lookup(&self, token: &str) -> Option<FormatTag> {
        self.entries.get(token).copied()
    }

    /// Resolves the format of `filename` from its trailing extension.
    pub fn resolve(&self, filename: &str) -> Option<FormatTag> {
        self.lookup(extension_of(filename))
    }

    /// Every distinct format some token maps to.
    pub fn formats(&self) -> Vec<FormatTag> {
        let mut formats: Vec<FormatTag> = self.entries.values().copied().collect();
        formats.sort();
        formats.dedup();
        formats
    }
}
