//! Destinations for encoded uploads.
//!
//! A sink hands out one writer per stored file; dropping the writer closes it.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Creates writable destinations for stored uploads.
pub trait StorageSink: Send + Sync {
    /// Open `path` for writing, creating or truncating it.
    fn create(&self, path: &str) -> io::Result<Box<dyn Write + Send>>;
}

/// Writes files on the local disk.
///
/// Parent directories must already exist.
#[derive(Debug, Clone, Default)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Paths are used as given, relative to the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths are resolved under `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl StorageSink for FsSink {
    fn create(&self, path: &str) -> io::Result<Box<dyn Write + Send>> {
        let file = File::create(self.resolve_path(path))?;
        Ok(Box::new(file))
    }
}

/// Accepts any path and throws the bytes away.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl StorageSink for DiscardSink {
    fn create(&self, _path: &str) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(io::sink()))
    }
}
