//! Configuration module for reshub
//!
//! Manages where collections come from, where bookmarks are kept and how
//! strictly item identities are checked. The file lives in the user's config
//! directory (`~/.config/reshub/config.toml` on Linux) and every key can be
//! overridden with a `RESHUB_` environment variable, using `__` between
//! sections (`RESHUB_SOURCE__BASE_URL`).

use crate::loader::{CollectionSource, DirSource, HttpSource, LoadOptions};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the three collections are fetched from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// HTTP base URL; collections are fetched as `<base_url>/<name>.json`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Local directory holding `<name>.json` files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Seconds before an HTTP request is abandoned
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            data_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    /// Build the configured collection source
    ///
    /// A base URL takes precedence over a data directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if neither is configured or the HTTP client
    /// cannot be built.
    pub fn open(&self) -> Result<Box<dyn CollectionSource>, ConfigError> {
        if let Some(url) = &self.base_url {
            let source = HttpSource::with_timeout(url.clone(), self.timeout())
                .map_err(|e| ConfigError::Message(format!("Failed to build HTTP client: {e}")))?;
            return Ok(Box::new(source));
        }
        if let Some(dir) = &self.data_dir {
            return Ok(Box::new(DirSource::new(dir.clone())));
        }
        Err(ConfigError::Message(
            "No collection source configured. Set source.base_url or source.data_dir, or pass --url/--dir.".into(),
        ))
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Bookmark persistence settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BookmarkConfig {
    /// Keep per-item bookmark flags across sessions
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bookmark database directory (defaults to the user data directory)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

const fn default_true() -> bool {
    true
}

impl Default for BookmarkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct HubConfig {
    /// Reject item sets where two items share a category and title
    #[serde(default)]
    pub strict_identities: bool,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub bookmarks: BookmarkConfig,
}

impl HubConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("reshub").join("config.toml"))
    }

    /// Load configuration from the default location plus the environment
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file or environment cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` plus the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or environment cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("RESHUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Directory of the bookmark database
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn bookmark_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.bookmarks.path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("reshub").join("bookmarks"))
    }

    #[must_use]
    pub const fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict_identities: self.strict_identities,
        }
    }

    /// Point the source at an HTTP base URL, replacing any directory
    pub fn use_url(&mut self, url: String) {
        self.source.base_url = Some(url);
        self.source.data_dir = None;
    }

    /// Point the source at a local directory, replacing any URL
    pub fn use_dir(&mut self, dir: PathBuf) {
        self.source.data_dir = Some(dir);
        self.source.base_url = None;
    }
}
