//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/course-catalog/catalog.toml`
//! 3. Local config: `<dir>/.catalog.toml` (usually the working directory)
//! 4. Environment variables: `CATALOG_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Course list read when no file is configured.
pub const DEFAULT_CATALOG_FILE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog_file: Option<PathBuf>,
    pub delimiter: Option<char>,
}

/// Unified configuration for the course catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Delimited course file loaded by `list`, `show`, `tree` and the menu
    pub catalog_file: PathBuf,
    /// Field separator within a course line
    pub delimiter: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            delimiter: ',',
        }
    }
}

/// Get the XDG config directory for the catalog.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "course-catalog").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("catalog.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".catalog.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.catalog_file.to_string_lossy().as_ref());
        self.catalog_file = PathBuf::from(expanded);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog_file: overlay
                .catalog_file
                .clone()
                .unwrap_or_else(|| self.catalog_file.clone()),
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.catalog.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply CATALOG_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("CATALOG").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog_file") {
            settings.catalog_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = parse_delimiter(&val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# course-catalog configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/course-catalog/catalog.toml
#   Local:  ./.catalog.toml
#   Env:    CATALOG_* environment variables

# Delimited course file (id,name,prereq,...)
# catalog_file = "{DEFAULT_CATALOG_FILE}"

# Field separator
# delimiter = ","
"#
        )
    }
}

fn parse_delimiter(value: &str) -> Result<char, ApplicationError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("delimiter must be a single character, got {value:?}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
