//! TOML configuration file loading and settings resolution
//!
//! ```toml
//! added-by = "admin"
//!
//! [queue]
//! batch-size = 10
//! delay-ms = 50
//! max-items = 1000
//!
//! [store]
//! capacity = 5000
//!
//! [logging]
//! level = "info"
//! format = "text"
//! file = "/var/log/moviebatch.log"
//! color = true
//! ```
//!
//! Precedence: command line, then configuration file, then defaults.

use super::args::Args;
use crate::catalog::ImportSettings;
use crate::core::error_handling::ContextualError;
use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::core::validation::validate_submitter;
use crate::queue::QueueConfig;
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for '{key}': {message}")]
    Invalid { key: String, message: String },

    #[error("No submitting user given; use --added-by or set 'added-by' in the configuration file")]
    MissingSubmitter,
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub added_by: Option<String>,
    #[serde(default)]
    pub queue: QueueSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct QueueSection {
    pub batch_size: Option<usize>,
    pub delay_ms: Option<u64>,
    pub max_items: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StoreSection {
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
    pub color: Option<bool>,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub file: PathBuf,
    pub added_by: String,
    pub import: ImportSettings,
    /// Catalog size limit; `None` is unlimited
    pub store_capacity: Option<usize>,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
    pub use_color: bool,
    pub json: bool,
}

/// Default configuration file location, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Moviebatch").join("moviebatch.toml"))
}

/// Load the configuration file
///
/// An explicitly given file must exist. Without one, the default location
/// is used when present.
pub async fn load_config(config_file: Option<&Path>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = match config_file {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
    parse_config(&contents)
        .map(Some)
        .map_err(|source| ConfigError::Parse { path, source })
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(contents)
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.into(),
    }
}

impl ConfigFile {
    /// Check values the command line would have rejected
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(user) = &self.added_by {
            validate_submitter(user).map_err(|e| invalid("added-by", e))?;
        }
        if self.queue.batch_size == Some(0) {
            return Err(invalid("queue.batch-size", "Value must be greater than 0"));
        }
        if self.queue.max_items == Some(0) {
            return Err(invalid("queue.max-items", "Value must be greater than 0"));
        }
        if self.store.capacity == Some(0) {
            return Err(invalid("store.capacity", "Value must be greater than 0"));
        }
        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(invalid(
                    "logging.level",
                    format!("'{}' is not one of {}", level, LOG_LEVELS.join(", ")),
                ));
            }
        }
        if let Some(format) = &self.logging.format {
            if !LOG_FORMATS.contains(&format.as_str()) {
                return Err(invalid(
                    "logging.format",
                    format!("'{}' is not one of {}", format, LOG_FORMATS.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

impl Args {
    /// Merge arguments over the configuration file and defaults
    pub fn resolve(&self, config: Option<ConfigFile>) -> Result<Settings, ConfigError> {
        let config = config.unwrap_or_default();
        config.validate()?;

        let added_by = self
            .added_by
            .clone()
            .or_else(|| config.added_by.as_deref().map(|user| user.trim().to_string()))
            .ok_or(ConfigError::MissingSubmitter)?;

        let defaults = ImportSettings::default();
        let batch_size = self
            .batch_size
            .or(config.queue.batch_size)
            .unwrap_or(defaults.queue.batch_size);
        let inter_batch_delay = self
            .delay_ms
            .or(config.queue.delay_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.queue.inter_batch_delay);
        let max_items = self
            .max_items
            .or(config.queue.max_items)
            .unwrap_or(defaults.max_items);

        let use_color = if self.color {
            true
        } else if self.no_color {
            false
        } else {
            config.logging.color.unwrap_or_else(|| {
                std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
            })
        };

        Ok(Settings {
            file: self.file.clone(),
            added_by,
            import: ImportSettings {
                queue: QueueConfig::new(batch_size, inter_batch_delay),
                max_items,
            },
            store_capacity: self.store_capacity.or(config.store.capacity),
            log_level: self
                .log_level
                .clone()
                .or(config.logging.level)
                .unwrap_or_else(|| "info".to_string()),
            log_format: self
                .log_format
                .clone()
                .or(config.logging.format)
                .unwrap_or_else(|| "text".to_string()),
            log_file: self.log_file.clone().or(config.logging.file),
            use_color,
            json: self.json,
        })
    }
}
