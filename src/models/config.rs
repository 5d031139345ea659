//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration, read from a JSON file at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the Gotify server
    #[serde(default)]
    pub gotify_url: String,

    /// Application token used to post messages
    #[serde(default)]
    pub gotify_token: String,

    /// Where the last seen bulletin is kept
    #[serde(default = "defaults::file_path")]
    pub file_path: String,

    /// Bulletin to watch
    #[serde(default = "defaults::bulletin_url")]
    pub bulletin_url: String,

    /// Informational API included in notifications
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// Seconds between checks
    #[serde(default = "defaults::check_interval")]
    pub check_interval_secs: u64,

    /// Send the token as `X-Gotify-Key` instead of in the query string
    #[serde(default)]
    pub token_in_header: bool,

    /// Write the snapshot through a temp file and rename
    #[serde(default)]
    pub atomic_write: bool,

    /// User-Agent header for outgoing requests
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load, normalize and validate configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("error reading config file {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Parse configuration from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(content)
            .map_err(|e| AppError::config(format!("error parsing config file: {e}")))?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Replace empty optional values with their defaults.
    fn apply_defaults(&mut self) {
        if self.file_path.is_empty() {
            self.file_path = defaults::file_path();
        }
        if self.bulletin_url.is_empty() {
            self.bulletin_url = defaults::bulletin_url();
        }
        if self.api_url.is_empty() {
            self.api_url = defaults::api_url();
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.gotify_url.trim().is_empty() || self.gotify_token.trim().is_empty() {
            return Err(AppError::config(
                "Gotify URL and token are required in config file",
            ));
        }
        Url::parse(&self.gotify_url)
            .map_err(|e| AppError::config(format!("gotify_url is not a valid URL: {e}")))?;
        if self.check_interval_secs == 0 {
            return Err(AppError::config("check_interval_secs must be > 0"));
        }
        if self.timeout_secs == Some(0) {
            return Err(AppError::config("timeout_secs must be > 0"));
        }
        Ok(())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.file_path)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

pub mod defaults {
    pub const BULLETIN_URL: &str = "https://datacenter.iers.org/data/latestVersion/bulletinC.txt";
    pub const API_URL: &str = "https://leap.webclock.io/leap.json";
    pub const FILE_PATH: &str = "bulletinC.txt";
    pub const CHECK_INTERVAL_SECS: u64 = 60 * 60;

    pub fn file_path() -> String {
        FILE_PATH.into()
    }
    pub fn bulletin_url() -> String {
        BULLETIN_URL.into()
    }
    pub fn api_url() -> String {
        API_URL.into()
    }
    pub fn check_interval() -> u64 {
        CHECK_INTERVAL_SECS
    }
}
