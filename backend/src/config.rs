//! Server configuration.
//!
//! Settings come from an optional `dashboard.toml` file and are then
//! overridden by environment variables. Every field has a default, so the
//! server starts with no configuration at all.
//!
//! # Environment Variables
//! - `DASHBOARD_CONFIG`: explicit path to the TOML file
//! - `HOST`, `PORT`: bind address
//! - `MODEL_SERVICE_URL`: base URL of the model service
//! - `MODEL_SERVICE_TIMEOUT_SECS`: upstream request timeout
//! - `DEFAULT_SAMPLE_SIZE`: sample size used when an upload omits one
//! - `MAX_DATASETS`: number of prediction sets kept in memory (0 = unbounded)
//! - `ALLOWED_ORIGINS`: comma-separated CORS origins (empty = any)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// File name searched for by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

/// Env var holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub model_service: ModelServiceSettings,
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum request body size, mostly relevant for CSV uploads.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    /// CORS origins. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_sample_size")]
    pub default_sample_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_max_datasets")]
    pub max_datasets: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    50 * 1024 * 1024
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_sample_size() -> u32 {
    3000
}

fn default_max_datasets() -> usize {
    32
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
            allowed_origins: Vec::new(),
        }
    }
}

impl Default for ModelServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_sample_size: default_sample_size(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            max_datasets: default_max_datasets(),
        }
    }
}

impl ServerSettings {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ModelServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path_str.clone(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|reason| ConfigError::Parse {
            path: path_str,
            reason,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        let config: AppConfig = toml::from_str(content).map_err(|e| e.to_string())?;
        config.check_positive()?;
        Ok(config)
    }

    /// Timeout and default sample size must be non-zero.
    fn check_positive(&self) -> Result<(), String> {
        if self.model_service.timeout_secs == 0 {
            return Err("model_service.timeout_secs must be greater than zero".to_string());
        }
        if self.model_service.default_sample_size == 0 {
            return Err("model_service.default_sample_size must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Search for `dashboard.toml` in the current directory, `backend/` and
    /// the parent directory. Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Full startup load: explicit `DASHBOARD_CONFIG` file, else the default
    /// search, else defaults; then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::from_default_location()?.unwrap_or_default(),
        };
        base.with_env_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup` (normally `std::env::var`).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }
        if let Some(port) = parse_override(&lookup, "PORT")? {
            self.server.port = port;
        }
        if let Some(url) = lookup("MODEL_SERVICE_URL").filter(|v| !v.trim().is_empty()) {
            self.model_service.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_positive_override(&lookup, "MODEL_SERVICE_TIMEOUT_SECS")? {
            self.model_service.timeout_secs = secs;
        }
        if let Some(size) = parse_positive_override(&lookup, "DEFAULT_SAMPLE_SIZE")? {
            self.model_service.default_sample_size = size;
        }
        if let Some(max) = parse_override(&lookup, "MAX_DATASETS")? {
            self.store.max_datasets = max;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(self)
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::InvalidEnv {
                    key: key.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}

fn parse_positive_override<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match parse_override::<T, F>(lookup, key)? {
        Some(value) if value == T::default() => Err(ConfigError::InvalidEnv {
            key: key.to_string(),
            value: lookup(key).unwrap_or_default(),
            reason: "must be greater than zero".to_string(),
        }),
        other => Ok(other),
    }
}
