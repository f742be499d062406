use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::geo::Coordinate;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_GEOCODE_API_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_USER_AGENT: &str = concat!("mapcast/", env!("CARGO_PKG_VERSION"));

/// Tokyo Station.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 35.6812,
    lng: 139.7671,
};
pub const DEFAULT_ZOOM: u8 = 6;
pub const DEFAULT_GEOCODE_ZOOM: u8 = 10;

/// Top-level configuration stored on disk.
///
/// Every field has a default, so a partial file only overrides what it names:
///
/// ```toml
/// language = "en"
///
/// [default_center]
/// lat = 51.5072
/// lng = -0.1276
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weather_api_url: String,
    pub geocode_api_url: String,
    /// `accept-language` sent to the geocoder.
    pub language: String,
    /// Detail level of reverse geocoding (10 = city).
    pub geocode_zoom: u8,
    pub tile_url_template: String,
    pub tile_attribution: String,
    pub default_zoom: u8,
    /// Unset means the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    // kept last: TOML tables must follow plain values
    pub default_center: Coordinate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            geocode_api_url: DEFAULT_GEOCODE_API_URL.to_string(),
            language: "ja".to_string(),
            geocode_zoom: DEFAULT_GEOCODE_ZOOM,
            tile_url_template: DEFAULT_TILE_URL_TEMPLATE.to_string(),
            tile_attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            default_zoom: DEFAULT_ZOOM,
            request_timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_center: DEFAULT_CENTER,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        self.validate()?;
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = self.to_toml()?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "mapcast", "mapcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<()> {
        let c = self.default_center;
        if !(-90.0..=90.0).contains(&c.lat) || !(-180.0..180.0).contains(&c.lng) {
            return Err(anyhow!(
                "default_center ({}) is outside lat [-90, 90] / lng [-180, 180)",
                c
            ));
        }
        if self.default_zoom > 19 {
            return Err(anyhow!("default_zoom must be between 0 and 19, got {}", self.default_zoom));
        }
        for key in ["{z}", "{x}", "{y}"] {
            if !self.tile_url_template.contains(key) {
                return Err(anyhow!("tile_url_template is missing the {key} placeholder"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_center_on_tokyo_station() {
        let cfg = Config::default();
        assert_eq!(cfg.default_center, DEFAULT_CENTER);
        assert_eq!(cfg.default_zoom, 6);
        assert_eq!(cfg.language, "ja");
        assert_eq!(cfg.geocode_zoom, 10);
        assert!(cfg.request_timeout().is_none());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let cfg = Config::from_toml(
            r#"
            language = "en"
            request_timeout_secs = 5

            [default_center]
            lat = 51.5072
            lng = -0.1276
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(cfg.default_center.lat, 51.5072);
        assert_eq!(cfg.weather_api_url, DEFAULT_WEATHER_API_URL);
    }

    #[test]
    fn empty_file_is_default() {
        let cfg = Config::from_toml("").expect("empty config is valid");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn rejects_center_out_of_range() {
        let err = Config::from_toml(
            r#"
            [default_center]
            lat = 95.0
            lng = 0.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("default_center"));
    }

    #[test]
    fn rejects_template_without_placeholders() {
        let err = Config::from_toml(r#"tile_url_template = "https://tiles.example/{z}.png""#)
            .unwrap_err();
        assert!(err.to_string().contains("{x}"));
    }

    #[test]
    fn toml_roundtrip_keeps_values() {
        let mut cfg = Config::default();
        cfg.language = "de".into();
        cfg.request_timeout_secs = Some(3);
        let text = cfg.to_toml().expect("serialize");
        assert_eq!(Config::from_toml(&text).expect("parse"), cfg);
    }
}
