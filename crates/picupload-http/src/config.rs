use std::path::PathBuf;

use envconfig::Envconfig;
use picupload_core::FsSink;

/// Server settings read from the environment.
#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,
    #[envconfig(from = "PORT", default = "3000")]
    pub port: u16,

    // ------------------
    // Storage
    /// Prefix of every stored path, e.g. `/images/` gives `/images/<id>.jpg`
    #[envconfig(from = "UPLOAD_LOCATION", default = "/images/")]
    pub upload_location: String,
    /// Directory stored paths are resolved under (empty means the working directory)
    #[envconfig(from = "STORAGE_ROOT", default = "")]
    pub storage_root: String,

    /// Max accepted request body in bytes
    #[envconfig(from = "MAX_UPLOAD_BYTES", default = "10485760")]
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, envconfig::Error> {
        Self::init_from_env()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn sink(&self) -> FsSink {
        FsSink::rooted(&self.storage_root)
    }

    /// Directory uploads land in; it has to exist before the first upload.
    pub fn upload_dir(&self) -> PathBuf {
        self.sink()
            .resolve_path(&format!(".{}", self.upload_location))
    }
}
