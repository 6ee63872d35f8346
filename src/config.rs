//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hiername/hiername.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `HIERNAME_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{AppError, AppResult};
use crate::domain::escape::parse_delimiter;
use crate::domain::{Name, NameResult, Representation, DEFAULT_DELIMITER};

/// Unified configuration for hiername.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Delimiter used to parse names given on the command line
    pub delimiter: String,
    /// Storage strategy for parsed names
    pub representation: Representation,
    /// Delimiter for `as_string` output (default: the name's own delimiter)
    pub render_delimiter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            representation: Representation::default(),
            render_delimiter: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub delimiter: Option<String>,
    pub representation: Option<Representation>,
    pub render_delimiter: Option<String>,
}

/// Get the XDG config directory for hiername.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hiername").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hiername.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> AppResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> AppError {
    AppError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            delimiter: overlay
                .delimiter
                .clone()
                .unwrap_or_else(|| self.delimiter.clone()),
            representation: overlay.representation.unwrap_or(self.representation),
            render_delimiter: overlay
                .render_delimiter
                .clone()
                .or_else(|| self.render_delimiter.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    ///
    /// # Errors
    /// `AppError::Config` for unreadable files, `AppError::Name` if a
    /// configured delimiter is not a valid name delimiter.
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading config file");
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply HIERNAME_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> AppResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("HIERNAME").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = val;
        }
        if let Ok(val) = config.get_string("render_delimiter") {
            settings.render_delimiter = Some(val);
        }
        if let Ok(val) = config.get_string("representation") {
            settings.representation = match val.to_lowercase().as_str() {
                "string" => Representation::String,
                "array" => Representation::Array,
                other => {
                    return Err(AppError::Config {
                        message: format!("unknown representation: {}", other),
                    })
                }
            };
        }

        Ok(settings)
    }

    /// Delimiters must satisfy the same precondition as name constructors.
    pub fn validate(&self) -> AppResult<()> {
        parse_delimiter(&self.delimiter)?;
        if let Some(render) = &self.render_delimiter {
            parse_delimiter(render)?;
        }
        Ok(())
    }

    /// Parse `source` with the configured delimiter and representation.
    pub fn parse_name(&self, source: &str) -> NameResult<Box<dyn Name>> {
        self.representation.parse(source, Some(&self.delimiter))
    }
}
