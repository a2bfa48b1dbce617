//! Runtime configuration for the command-line client
//!
//! Settings come from, in order of precedence: command-line flags (or their
//! environment variables), an optional TOML file, then built-in defaults.
//!
//! ```toml
//! [server]
//! base_url = "https://cv.example.com"
//! timeout_secs = 60
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Contents of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Origin the relative endpoints are joined to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout, uploads included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Effective settings after applying overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Apply flag overrides and check the result
    pub fn resolve(
        self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Settings> {
        let base_url = base_url.unwrap_or(self.server.base_url);
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let lower = base_url.to_ascii_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            bail!("Base URL must start with http:// or https://: {}", base_url);
        }

        let timeout_secs = timeout_secs.unwrap_or(self.server.timeout_secs);
        if timeout_secs == 0 {
            bail!("Timeout must be at least one second");
        }

        Ok(Settings {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
