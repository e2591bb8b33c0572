use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Storage configuration
///
/// The whole collection lives in one JSON document; `path` is where that
/// document is kept on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
        }
    }
}

fn default_document_path() -> PathBuf {
    PathBuf::from("torrentbay.json")
}

/// View pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Quiescence window for search input before recomputing (milliseconds)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Interval between background reloads of the record set (seconds)
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_refresh_interval_secs() -> u64 {
    5
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub view: ViewConfig,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            storage: config.storage.clone(),
            view: config.view.clone(),
        }
    }
}
