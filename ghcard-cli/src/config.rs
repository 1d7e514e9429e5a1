//! Configuration file.
//!
//! Stored as JSON at `<config dir>/ghcard/config.json`. A missing file means
//! defaults; missing keys inside a file fall back to their defaults too.

use ghcard_core::ColorChoice;
use ghcard_export::{DEFAULT_EXPORT_TIMEOUT_SECS, ExportSettings, PaperSize};
use ghcard_fetch::{
    ClientSettings, DEFAULT_API_BASE, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, MAX_PAGE_SIZE,
    USER_AGENT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Error reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration JSON.
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Serialization failed.
    #[error("Cannot serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============================================================================
// Config Sections
// ============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API access.
    #[serde(default)]
    pub api: ApiConfig,
    /// PDF export.
    #[serde(default)]
    pub export: ExportConfig,
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// GitHub API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Repositories per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

/// PDF export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Converter program or `builtin`; detected on `PATH` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,
    /// Directory the PDF is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Page size.
    #[serde(default)]
    pub paper: PaperSize,
    /// Converter timeout in seconds.
    #[serde(default = "default_export_timeout")]
    pub timeout_secs: u64,
    /// Also keep the rendered HTML next to the PDF.
    #[serde(default)]
    pub keep_html: bool,
}

/// General settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log at debug level without `--verbose`.
    #[serde(default)]
    pub verbose: bool,
    /// Color used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<ColorChoice>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_api_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_timeout() -> u64 {
    DEFAULT_EXPORT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            page_size: default_page_size(),
            timeout_secs: default_api_timeout(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            converter: None,
            output_dir: default_output_dir(),
            paper: PaperSize::default(),
            timeout_secs: default_export_timeout(),
            keep_html: false,
        }
    }
}

// ============================================================================
// Loading and Saving
// ============================================================================

impl Config {
    /// Returns the default configuration directory.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ghcard")
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_dir().join("config.json")
    }

    /// Loads configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Page size clamped to what GitHub accepts.
    pub fn page_size(&self) -> u32 {
        self.api.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Settings for the GitHub client.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api.base_url.clone(),
            user_agent: self.api.user_agent.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }

    /// Settings for the PDF exporter.
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            output_dir: self.export.output_dir.clone(),
            converter: self.export.converter.clone(),
            paper: self.export.paper,
            timeout: Duration::from_secs(self.export.timeout_secs),
            keep_html: self.export.keep_html,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
