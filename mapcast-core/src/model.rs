use serde::{Deserialize, Serialize};

/// Conditions at the time of the request, as reported by the weather API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Local ISO-8601 time without offset, e.g. `2024-05-01T12:15`.
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub precipitation: f64,
    pub wind_speed_10m: f64,
    pub weather_code: i32,
}

/// Hourly forecast as parallel, index-aligned arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub precipitation: Vec<f64>,
    #[serde(default)]
    pub wind_speed_10m: Vec<f64>,
    #[serde(default)]
    pub weather_code: Vec<i32>,
}

impl HourlySeries {
    /// Number of hours for which every series has a value.
    pub fn len(&self) -> usize {
        [
            self.time.len(),
            self.temperature_2m.len(),
            self.precipitation.len(),
            self.wind_speed_10m.len(),
            self.weather_code.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Units reported next to `current`, used for labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUnits {
    #[serde(default = "default_temperature_unit")]
    pub temperature_2m: String,
    #[serde(default = "default_humidity_unit")]
    pub relative_humidity_2m: String,
    #[serde(default = "default_precipitation_unit")]
    pub precipitation: String,
    #[serde(default = "default_wind_unit")]
    pub wind_speed_10m: String,
}

impl Default for CurrentUnits {
    fn default() -> Self {
        Self {
            temperature_2m: default_temperature_unit(),
            relative_humidity_2m: default_humidity_unit(),
            precipitation: default_precipitation_unit(),
            wind_speed_10m: default_wind_unit(),
        }
    }
}

fn default_temperature_unit() -> String {
    "°C".to_string()
}

fn default_humidity_unit() -> String {
    "%".to_string()
}

fn default_precipitation_unit() -> String {
    "mm".to_string()
}

fn default_wind_unit() -> String {
    "km/h".to_string()
}

/// Current conditions plus the hourly forecast for one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    /// IANA name such as `Asia/Tokyo`.
    pub timezone: String,
    pub timezone_abbreviation: Option<String>,
    pub current_units: CurrentUnits,
}
