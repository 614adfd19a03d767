//! Configuration system (layered: code > env > config file > defaults).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Connection settings for the Postcraft API.
///
/// # Example
/// ```
/// use postcraft::config::ClientConfig;
///
/// let config = ClientConfig::default().with_base_url("https://studio.example.com/api");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 60,
            connect_timeout_secs: 10,
            poll_interval_ms: 3000,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Read a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            ClientError::Configuration(format!("invalid config {}: {e}", path.display()))
        })
    }

    /// `~/.postcraft/config.toml`.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".postcraft"))
            .unwrap_or_else(|| PathBuf::from(".postcraft"))
            .join("config.toml")
    }

    /// Defaults overridden by environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::default().apply_env()
    }

    /// Default config file (when present), then environment overrides.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let path = Self::default_path();
        let base = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        let config = base.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var("POSTCRAFT_API_URL") {
            self.base_url = url;
        }
        if let Some(secs) = env_u64("POSTCRAFT_TIMEOUT_SECS") {
            self.request_timeout_secs = secs;
        }
        if let Some(ms) = env_u64("POSTCRAFT_POLL_INTERVAL_MS") {
            self.poll_interval_ms = ms;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Configuration(format!(
                "base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(ClientError::Configuration(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Join `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `path` under the base URL with `segment` appended as a single
    /// percent-encoded path segment.
    pub fn resource_url(&self, path: &str, segment: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.endpoint(path))
            .map_err(|e| ClientError::Configuration(format!("invalid base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Configuration(format!("base_url cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn env_u64(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring non-numeric environment override");
            None
        }
    }
}
