// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[interaction]` - Advisory flags for the rendering layer (haptics)
//! - `[stack]` - Stacking presentation (depth step)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `INDICATOR_STACK_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use indicator_stack::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.interaction.haptics_enabled = Some(false);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::lifecycle::DepthStep;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IndicatorStack";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "INDICATOR_STACK_CONFIG_DIR";

/// Warning key returned by [`load`] when the settings file could not be parsed.
pub const LOAD_WARNING_KEY: &str = "indicator-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Interaction settings consumed by the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionConfig {
    /// Play haptic feedback when an indicator is expanded or collapsed.
    #[serde(
        default = "default_haptics_enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub haptics_enabled: Option<bool>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            haptics_enabled: default_haptics_enabled(),
        }
    }
}

/// Stack presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackConfig {
    /// Scale reduction per level below the top of the stack.
    #[serde(
        default = "default_depth_step",
        skip_serializing_if = "Option::is_none"
    )]
    pub depth_step: Option<f32>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            depth_step: default_depth_step(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Crate configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub interaction: InteractionConfig,

    #[serde(default)]
    pub stack: StackConfig,
}

impl Config {
    /// Resolved haptics flag, falling back to the default when unset.
    #[must_use]
    pub fn haptics_enabled(&self) -> bool {
        self.interaction
            .haptics_enabled
            .unwrap_or(DEFAULT_HAPTICS_ENABLED)
    }

    /// Resolved depth step, clamped to the valid range.
    #[must_use]
    pub fn depth_step(&self) -> DepthStep {
        self.stack
            .depth_step
            .map(DepthStep::new)
            .unwrap_or_default()
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_haptics_enabled() -> Option<bool> {
    Some(DEFAULT_HAPTICS_ENABLED)
}

fn default_depth_step() -> Option<f32> {
    Some(DEFAULT_DEPTH_STEP)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory, honoring an explicit override first and the
/// `INDICATOR_STACK_CONFIG_DIR` environment variable second.
fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "falling back to default config"
                    );
                    return (Config::default(), Some(LOAD_WARNING_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_config_path_with_override(None) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let config = Config {
            interaction: InteractionConfig {
                haptics_enabled: Some(false),
            },
            stack: StackConfig {
                depth_step: Some(0.1),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_errors_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn load_with_override_returns_warning_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[stack\n").expect("failed to write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(LOAD_WARNING_KEY));
    }

    #[test]
    fn load_with_override_without_file_returns_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("[interaction]\nhaptics_enabled = false\n")
            .expect("partial config should parse");
        assert!(!config.haptics_enabled());
        assert_eq!(config.stack.depth_step, Some(DEFAULT_DEPTH_STEP));
    }

    #[test]
    fn depth_step_is_clamped_when_resolved() {
        let config = Config {
            stack: StackConfig {
                depth_step: Some(3.0),
            },
            ..Config::default()
        };
        assert_abs_diff_eq!(config.depth_step().value(), MAX_DEPTH_STEP);
    }

    #[test]
    fn unset_values_resolve_to_defaults() {
        let config = Config {
            interaction: InteractionConfig {
                haptics_enabled: None,
            },
            stack: StackConfig { depth_step: None },
        };
        assert_eq!(config.haptics_enabled(), DEFAULT_HAPTICS_ENABLED);
        assert_abs_diff_eq!(config.depth_step().value(), DEFAULT_DEPTH_STEP);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir
            .path()
            .join("deep")
            .join("path")
            .join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
