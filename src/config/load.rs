//! The main config loading module for atax.
//!
//! Handles loading and deserializing settings from an atax.toml file.
//! No file is read unless one is named explicitly, either with `--config <FILE>` or the
//! `ATAX_CONFIG` environment variable. Everything else runs on the internal defaults.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.

use crate::config::{General, InternalGeneral, Keys, Programs, Theme};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "ATAX_CONFIG";

/// Raw configuration as read from the toml file
/// It uses owned types and is then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    programs: Programs,
    theme: Theme,
    keys: Keys,
}

/// Main configuration struct for atax
/// This struct holds the processed configuration options used by atax.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    programs: Programs,
    theme: Theme,
    keys: Keys,
}

/// Conversion from RawConfig to Config
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            programs: raw.programs,
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Loads the configuration from `explicit`, or from `ATAX_CONFIG` when no path was given.
    ///
    /// Without either, or when the file can not be read or parsed, the internal defaults
    /// are used and a warning is printed.
    pub fn load(explicit: Option<&Path>) -> Self {
        let Some(path) = Self::resolve_path(explicit) else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded config");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "config parse failed");
                    eprintln!("[atax] Error parsing config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config read failed");
                eprintln!("[atax] Could not read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses a configuration from toml text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    /// The file to read: the explicit path first, then `ATAX_CONFIG` if set and non-empty.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn programs(&self) -> &Programs {
        &self.programs
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}
