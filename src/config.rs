//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::{APP_BINARY_NAME, DEFAULT_LAYER_NAMES};
use crate::models::geometry_by_name;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "KBVIEW_CONFIG_DIR";

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Lowercase name used on the command line and in JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err("Invalid theme mode. Must be 'auto', 'light', or 'dark'".to_string()),
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the `.vil` layout files (relative profile paths resolve here)
    pub layouts_dir: Option<PathBuf>,
}

/// A keyboard the viewer knows how to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardProfile {
    /// Profile name shown in the viewer (e.g., "elora")
    pub name: String,
    /// Built-in geometry id ("elora", "corne", "corne-v4", "crkbd")
    pub geometry: String,
    /// Layout file, absolute or relative to `paths.layouts_dir`
    pub layout_file: PathBuf,
    /// Layer names in order
    #[serde(default)]
    pub layer_names: Vec<String>,
}

impl KeyboardProfile {
    /// Creates a profile with the default layer names, truncated to `layer_count`.
    pub fn new(
        name: impl Into<String>,
        geometry: impl Into<String>,
        layout_file: impl Into<PathBuf>,
        layer_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            geometry: geometry.into(),
            layout_file: layout_file.into(),
            layer_names: DEFAULT_LAYER_NAMES
                .iter()
                .take(layer_count)
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Profile shown when the viewer starts (first profile when unset)
    #[serde(default)]
    pub default_keyboard: Option<String>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/kbview/config.toml`
/// - macOS: `~/Library/Application Support/kbview/config.toml`
/// - Windows: `%APPDATA%\kbview\config.toml`
///
/// `KBVIEW_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `layouts_dir` must exist if set
/// - profile names must be unique and non-empty
/// - every profile must name a built-in geometry
/// - `default_keyboard` must name a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Keyboard profiles
    #[serde(default = "default_keyboards")]
    pub keyboards: Vec<KeyboardProfile>,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

/// The two keyboards the viewer ships geometry for.
fn default_keyboards() -> Vec<KeyboardProfile> {
    vec![
        KeyboardProfile::new("elora", "elora", "elora.vil", 8),
        KeyboardProfile::new("corne", "corne", "corne-v4.vil", 6),
    ]
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: PathConfig::default(),
            keyboards: default_keyboards(),
            ui: UiConfig::default(),
        }
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/kbview/`
    /// - macOS: `~/Library/Application Support/kbview/`
    /// - Windows: `%APPDATA%\kbview\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Log file used while the terminal viewer owns the screen.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(format!("{APP_BINARY_NAME}.log")))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config = Self::read_from(config_path)?;
        config.validate()?;

        tracing::debug!(
            path = %config_path.display(),
            keyboards = config.keyboards.len(),
            "loaded config"
        );

        Ok(config)
    }

    /// Reads the config file without validating it.
    ///
    /// Used by commands that edit the file, so a stale entry can be
    /// repaired instead of being replaced by defaults.
    pub fn read() -> Result<Self> {
        Self::read_from(&Self::config_file_path()?)
    }

    /// Reads a specific config file without validating it.
    pub fn read_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        tracing::info!(path = %config_path.display(), "saved config");

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.paths.layouts_dir {
            if !dir.is_dir() {
                anyhow::bail!("Layouts directory does not exist: {}", dir.display());
            }
        }

        for (idx, profile) in self.keyboards.iter().enumerate() {
            if profile.name.trim().is_empty() {
                anyhow::bail!("Keyboard profile {} has an empty name", idx);
            }

            if self.keyboards[..idx].iter().any(|p| p.name == profile.name) {
                anyhow::bail!("Duplicate keyboard profile: {}", profile.name);
            }

            if geometry_by_name(&profile.geometry).is_none() {
                anyhow::bail!(
                    "Keyboard profile '{}' has unknown geometry '{}'",
                    profile.name,
                    profile.geometry
                );
            }
        }

        if let Some(name) = &self.ui.default_keyboard {
            if self.profile(name).is_none() {
                anyhow::bail!("Default keyboard '{}' is not a configured profile", name);
            }
        }

        Ok(())
    }

    /// Finds a profile by name (case-insensitive).
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&KeyboardProfile> {
        self.keyboards
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Index of the profile the viewer starts with.
    #[must_use]
    pub fn default_profile_index(&self) -> usize {
        self.ui
            .default_keyboard
            .as_deref()
            .and_then(|name| {
                self.keyboards
                    .iter()
                    .position(|p| p.name.eq_ignore_ascii_case(name))
            })
            .unwrap_or(0)
    }

    /// Resolves a profile's layout file against `layouts_dir`.
    #[must_use]
    pub fn resolve_layout_path(&self, profile: &KeyboardProfile) -> PathBuf {
        if profile.layout_file.is_absolute() {
            return profile.layout_file.clone();
        }

        self.paths
            .layouts_dir
            .as_ref()
            .map_or_else(|| profile.layout_file.clone(), |dir| dir.join(&profile.layout_file))
    }

    /// Sets the layouts directory; it must be an existing directory.
    pub fn set_layouts_dir(&mut self, path: PathBuf) -> Result<()> {
        if !path.is_dir() {
            anyhow::bail!("Layouts directory does not exist: {}", path.display());
        }
        self.paths.layouts_dir = Some(path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
