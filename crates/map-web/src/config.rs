//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use map_store::StoreBackend;

/// Map server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Persistence backend.
    pub store: StoreBackend,
    /// Public origin used to build absolute embed URLs (no trailing slash).
    pub public_url: String,
    /// Largest accepted upload body, in bytes.
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MAP_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `MAP_STORE` | `file`, `memory` or `sqlite` | `file` |
    /// | `MAP_DATA_DIR` | Directory for the file store | `data` |
    /// | `MAP_SQLITE_URL` | Database URL for the sqlite store | `sqlite:maps.db?mode=rwc` |
    /// | `MAP_PUBLIC_URL` | Origin for absolute embed URLs | `http://<MAP_ADDR>` |
    /// | `MAP_MAX_UPLOAD_BYTES` | Upload size limit | `10485760` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr: SocketAddr = lookup("MAP_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let store = match lookup("MAP_STORE")
            .unwrap_or_else(|| "file".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "file" => StoreBackend::File(PathBuf::from(
                lookup("MAP_DATA_DIR").unwrap_or_else(|| "data".to_string()),
            )),
            "memory" => StoreBackend::Memory,
            "sqlite" => StoreBackend::Sqlite(
                lookup("MAP_SQLITE_URL").unwrap_or_else(|| "sqlite:maps.db?mode=rwc".to_string()),
            ),
            other => return Err(ConfigError::InvalidStore(other.to_string())),
        };

        let public_url = lookup("MAP_PUBLIC_URL")
            .unwrap_or_else(|| format!("http://{}", addr))
            .trim_end_matches('/')
            .to_string();

        let max_upload_bytes = match lookup("MAP_MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidUploadLimit(raw))?,
            None => 10 * 1024 * 1024,
        };

        Ok(Self {
            addr,
            store,
            public_url,
            max_upload_bytes,
        })
    }

    /// Absolute URL of a map's embed page.
    pub fn embed_url(&self, id: &str) -> String {
        format!("{}{}", self.public_url, map_store::embed_path(id))
    }

    /// `<iframe>` snippet for embedding a map elsewhere.
    pub fn embed_code(&self, id: &str) -> String {
        format!(
            r#"<iframe src="{}" width="100%" height="500" frameborder="0"></iframe>"#,
            self.embed_url(id)
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MAP_ADDR format")]
    InvalidAddr,

    #[error("Unknown MAP_STORE backend: {0} (expected file, memory or sqlite)")]
    InvalidStore(String),

    #[error("Invalid MAP_MAX_UPLOAD_BYTES: {0}")]
    InvalidUploadLimit(String),
}
