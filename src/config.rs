//! Configuration management for localcast.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! `LOCALCAST_*` environment variables. Command-line flags are applied last
//! by the CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::coordinator::CoordinatorOptions;
use crate::map::MapOptions;
use crate::models::{Coordinate, LanguageCode};
use crate::tracker::TrackingMode;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL the `/get_weather_and_places` path is resolved against
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent (defaults to localcast/<version>)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub container: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Seoul City Hall
        Self {
            container: "map".to_string(),
            center_lat: 37.5665,
            center_lon: 126.978,
            zoom: 10,
        }
    }
}

/// Location tracking behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub mode: TrackingMode,
    pub cancel_on_click: bool,
    pub recenter_on_fix: bool,
    /// Ask whether to use the current location at startup
    pub prompt_on_boot: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            mode: TrackingMode::Continuous,
            cancel_on_click: true,
            recenter_on_fix: true,
            prompt_on_boot: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "lenient_language")]
    pub default_language: LanguageCode,
    pub backend: BackendConfig,
    pub map: MapConfig,
    pub tracking: TrackingConfig,
}

/// Unknown language codes fall back to Korean, as on the command line.
fn lenient_language<'de, D>(deserializer: D) -> Result<LanguageCode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Ok(LanguageCode::from_code_or_default(Some(&code)))
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LOCALCAST_BACKEND_URL`: backend base URL
    /// - `LOCALCAST_TIMEOUT_SECS`: request timeout
    /// - `LOCALCAST_LANGUAGE`: KO, EN, JA, ZH or RU (unknown codes mean KO)
    /// - `LOCALCAST_TRACKING_MODE`: "one-shot" or "continuous"
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("LOCALCAST_BACKEND_URL") {
            self.backend.base_url = val;
        }
        if let Some(val) = lookup("LOCALCAST_TIMEOUT_SECS") {
            match val.parse() {
                Ok(n) => self.backend.timeout_secs = n,
                Err(_) => warn!("Ignoring LOCALCAST_TIMEOUT_SECS={}", val),
            }
        }
        if let Some(val) = lookup("LOCALCAST_LANGUAGE") {
            self.default_language = LanguageCode::from_code_or_default(Some(&val));
        }
        if let Some(val) = lookup("LOCALCAST_TRACKING_MODE") {
            match TrackingMode::from_str(&val) {
                Some(mode) => self.tracking.mode = mode,
                None => warn!("Ignoring LOCALCAST_TRACKING_MODE={}", val),
            }
        }
        self
    }

    pub fn map_options(&self) -> Result<MapOptions, ConfigError> {
        let center = Coordinate::new(self.map.center_lat, self.map.center_lon)
            .map_err(|e| ConfigError::Invalid(format!("map center: {}", e)))?;
        Ok(MapOptions {
            center,
            zoom: self.map.zoom,
        })
    }

    pub fn coordinator_options(&self) -> CoordinatorOptions {
        CoordinatorOptions {
            mode: self.tracking.mode,
            cancel_tracking_on_click: self.tracking.cancel_on_click,
            recenter_on_fix: self.tracking.recenter_on_fix,
            default_language: self.default_language,
        }
    }
}

/// Default config file location (`<config dir>/localcast/config.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("localcast").join("config.toml"))
}

/// Load settings from `path`, or from the default location when it exists.
///
/// An explicit path must exist; a missing default file just means defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path().filter(|p| p.exists()),
    };

    let settings = match file {
        Some(file) => {
            debug!("Loading config from {}", file.display());
            let text = std::fs::read_to_string(&file).map_err(|source| ConfigError::Io {
                path: file.clone(),
                source,
            })?;
            Settings::from_toml(&text)?
        }
        None => Settings::default(),
    };

    Ok(settings.with_env_overrides())
}
