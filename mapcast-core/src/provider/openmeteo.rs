use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{FetchError, truncate_body},
    geo::Coordinate,
    model::{CurrentConditions, CurrentUnits, HourlySeries, WeatherSnapshot},
};

use super::WeatherProvider;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m,weather_code";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation,wind_speed_10m,weather_code";
/// Today and tomorrow: enough for a 24 hour window starting at any hour.
const FORECAST_DAYS: &str = "2";

/// Open-Meteo forecast client (no API key).
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn with_client(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn query(coordinate: &Coordinate) -> [(&'static str, String); 7] {
        [
            ("latitude", coordinate.lat.to_string()),
            ("longitude", coordinate.lng.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("timezone", "auto".to_string()),
            ("timeformat", "iso8601".to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: Option<CurrentConditions>,
    current_units: Option<CurrentUnits>,
    hourly: Option<HourlySeries>,
    #[serde(default)]
    timezone: String,
    timezone_abbreviation: Option<String>,
}

impl OmResponse {
    fn into_snapshot(self) -> Option<WeatherSnapshot> {
        let (Some(current), Some(hourly)) = (self.current, self.hourly) else {
            return None;
        };

        Some(WeatherSnapshot {
            current,
            hourly,
            timezone: self.timezone,
            timezone_abbreviation: self.timezone_abbreviation,
            current_units: self.current_units.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch_weather(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Option<WeatherSnapshot>, FetchError> {
        tracing::debug!(%coordinate, url = %self.base_url, "requesting Open-Meteo forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&Self::query(coordinate))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse = serde_json::from_str(&body)?;
        let snapshot = parsed.into_snapshot();
        if snapshot.is_none() {
            tracing::warn!(%coordinate, "Open-Meteo response lacks current or hourly data");
        }

        Ok(snapshot)
    }
}
