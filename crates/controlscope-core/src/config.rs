//! Configuration management for Controlscope.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default catalog API base URL.
pub const DEFAULT_BASE_URL: &str = "https://csrc.nist.gov/api/csrc/v1";

/// Default fetch timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main application configuration.
///
/// This is loaded from `~/.config/controlscope/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote catalog settings
    pub catalog: CatalogConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here. The result
    /// is not validated; call [`AppConfig::validate`] once every override has
    /// been applied.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `CONTROLSCOPE_CATALOG_URL`: Override the catalog base URL
    /// - `CONTROLSCOPE_TIMEOUT_SECS`: Override the fetch timeout
    /// - `CONTROLSCOPE_OFFLINE`: Skip the remote fetch (true/false)
    ///
    /// Like [`AppConfig::load_from`], the result is not validated.
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("CONTROLSCOPE_CATALOG_URL") {
            tracing::debug!("Override catalog.base_url from env: {}", url);
            self.catalog.base_url = url;
        }

        if let Some(val) = lookup("CONTROLSCOPE_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.catalog.timeout_secs = secs;
                tracing::debug!("Override catalog.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("CONTROLSCOPE_OFFLINE") {
            if let Ok(offline) = val.parse() {
                self.catalog.offline = offline;
                tracing::debug!("Override catalog.offline from env: {}", offline);
            }
        }
    }

    /// Check values that would make the catalog unusable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "catalog.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if !self.catalog.offline && self.catalog.endpoints.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog.endpoints".to_string(),
                reason: "at least one endpoint is required unless offline".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/controlscope/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("org", "controlscope", "controlscope")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    pub base_url: String,
    /// Endpoint paths tried in order, relative to `base_url`
    pub endpoints: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Skip the remote fetch and use the embedded catalog
    pub offline: bool,
}

impl CatalogConfig {
    /// Fetch timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: vec![
                "/controls/sp800-53/r5".to_string(),
                "/controls".to_string(),
                "/publications/800-53/rev-5/controls".to_string(),
            ],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            offline: false,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory export artifacts are written to
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}
