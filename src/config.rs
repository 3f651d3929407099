//! Startup configuration
//!
//! Read once from `<config dir>/lunaclock/config.json` (or an explicit path),
//! then overlaid with the environment and command-line flags.

use crate::location::{default_locations, LocationSpec};
use crate::tui::theme::ClockTheme;
use crate::weather::{WeatherConfig, DEFAULT_BASE_URL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "LUNACLOCK_WEATHER_KEY";

/// On-disk shape; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub weather_api_key: Option<String>,
    pub weather_base_url: Option<String>,
    pub theme: Option<ClockTheme>,
    pub default_location: Option<String>,
    pub locations: Option<Vec<LocationSpec>>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub weather: WeatherConfig,
    pub theme: ClockTheme,
    pub default_location: Option<String>,
    pub locations: Vec<LocationSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(ConfigFile::default(), None)
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lunaclock").join("config.json"))
}

impl Config {
    /// Merge a parsed file with an optional key from the environment
    pub fn resolve(file: ConfigFile, env_key: Option<String>) -> Self {
        let api_key = env_key
            .filter(|k| !k.trim().is_empty())
            .or(file.weather_api_key)
            .map(|k| k.trim().to_string());

        Self {
            weather: WeatherConfig {
                api_key,
                base_url: file
                    .weather_base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
            theme: file.theme.unwrap_or_default(),
            default_location: file.default_location,
            locations: file
                .locations
                .filter(|l| !l.is_empty())
                .unwrap_or_else(default_locations),
        }
    }

    /// Parse a config file from disk
    pub fn read_file(path: &Path) -> Result<ConfigFile> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Self::read_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::read_file(&p)?,
                _ => {
                    debug!("no config file, using defaults");
                    ConfigFile::default()
                }
            },
        };
        Ok(Self::resolve(file, std::env::var(API_KEY_ENV).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = Config::resolve(ConfigFile::default(), None);
        assert_eq!(config.weather.api_key, None);
        assert_eq!(config.weather.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.theme, ClockTheme::Cosmic);
        assert_eq!(config.locations.len(), 18);
    }

    #[test]
    fn file_fields_apply() {
        let file: ConfigFile = serde_json::from_str(
            r#"{
                "weather_api_key": "abc",
                "theme": "gold",
                "default_location": "Tokyo",
                "locations": [{"label": "Home", "timezone": "Europe/Dublin", "city": "Dublin"}]
            }"#,
        )
        .unwrap();
        let config = Config::resolve(file, None);
        assert_eq!(config.weather.api_key.as_deref(), Some("abc"));
        assert_eq!(config.theme, ClockTheme::Gold);
        assert_eq!(config.default_location.as_deref(), Some("Tokyo"));
        assert_eq!(
            config.locations,
            vec![LocationSpec::new("Home", "Europe/Dublin", "Dublin")]
        );
    }

    #[test]
    fn env_key_wins_over_file() {
        let file = ConfigFile {
            weather_api_key: Some("from-file".into()),
            ..ConfigFile::default()
        };
        let config = Config::resolve(file.clone(), Some("from-env".into()));
        assert_eq!(config.weather.api_key.as_deref(), Some("from-env"));

        let blank_env = Config::resolve(file, Some("  ".into()));
        assert_eq!(blank_env.weather.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn empty_location_list_falls_back() {
        let file = ConfigFile {
            locations: Some(Vec::new()),
            ..ConfigFile::default()
        };
        assert_eq!(Config::resolve(file, None).locations, default_locations());
    }

    #[test]
    fn unknown_theme_is_a_parse_error() {
        assert!(serde_json::from_str::<ConfigFile>(r#"{"theme":"neon"}"#).is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let path = std::env::temp_dir().join("lunaclock-does-not-exist.json");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("lunaclock-test-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"weather_base_url":"http://localhost:9"}"#).unwrap();
        let file = Config::read_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(file.weather_base_url.as_deref(), Some("http://localhost:9"));
    }
}
