//! Configuration management for donorlink.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "donorlink";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "donors.db";

/// Directory of unsubmitted form drafts, under the data directory.
const DRAFTS_DIR_NAME: &str = "drafts";

/// Highest zoom level accepted for the map view.
const MAX_ZOOM: u8 = 19;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (`DONORLINK_` prefix, `__` between section and
///    key, e.g. `DONORLINK_STORE__SEED_ON_EMPTY=false`)
/// 2. TOML config file at `~/.config/donorlink/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record store configuration.
    pub store: StoreConfig,
    /// Map view configuration.
    pub map: MapConfig,
}

/// Which record store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// `SQLite` database file at `database_path`.
    #[default]
    Sqlite,
    /// Process-local store; nothing survives exit.
    Memory,
}

/// Record store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store implementation.
    pub backend: StoreBackend,
    /// Path to the database file.
    /// Defaults to `~/.local/share/donorlink/donors.db`
    pub database_path: Option<PathBuf>,
    /// Populate empty collections with the built-in seed records.
    pub seed_on_empty: bool,
}

/// Map view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Latitude of the initial map centre.
    pub center_lat: f64,
    /// Longitude of the initial map centre.
    pub center_lng: f64,
    /// Initial zoom level.
    pub zoom: u8,
    /// Fraction of the fitted bounds added on every side.
    pub fit_padding: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database_path: None, // Will be resolved to default at runtime
            seed_on_empty: true,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 40.7128,
            center_lng: -74.0060,
            zoom: 10,
            fit_padding: 0.1,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("DONORLINK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Get the directory holding unsubmitted registration drafts.
    #[must_use]
    pub fn drafts_dir() -> PathBuf {
        Self::default_data_dir().join(DRAFTS_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let map = &self.map;

        if !(-90.0..=90.0).contains(&map.center_lat) {
            return Err(Error::ConfigValidation {
                message: format!("center_lat ({}) must be within -90..=90", map.center_lat),
            });
        }

        if !(-180.0..=180.0).contains(&map.center_lng) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "center_lng ({}) must be within -180..=180",
                    map.center_lng
                ),
            });
        }

        if map.zoom > MAX_ZOOM {
            return Err(Error::ConfigValidation {
                message: format!("zoom ({}) cannot be greater than {MAX_ZOOM}", map.zoom),
            });
        }

        if !map.fit_padding.is_finite() || map.fit_padding < 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "fit_padding ({}) must be a non-negative number",
                    map.fit_padding
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.store
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
