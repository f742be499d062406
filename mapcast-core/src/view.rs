//! View model for the weather panels.
//!
//! [`ViewState`] plays the role of the page: the controller writes into it,
//! front ends read it and paint. Nothing here performs I/O.

use std::ops::Range;

use chrono::{NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use crate::{
    color::{Category, Rgb, contrast_color, interpolate},
    geo::Coordinate,
    model::{HourlySeries, WeatherSnapshot},
    weather_code::{self, WeatherCode},
};

/// Number of forecast rows shown after the current hour.
pub const FORECAST_HOURS: usize = 24;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Status line under the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    /// The click could not be completed. Transport errors and payloads
    /// without usable data look the same to the user.
    Failed,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Status::Idle => "地図をクリックして天気を表示します",
            Status::Loading => "天気情報を取得中...",
            Status::Success => "天気情報を更新しました",
            Status::Failed => "天気情報の取得に失敗しました。もう一度お試しください",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Failed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCard {
    pub icon: &'static str,
    pub label: &'static str,
    pub temperature: String,
    pub humidity: String,
    pub precipitation: String,
    pub wind_speed: String,
}

impl CurrentCard {
    /// `"☀️ 快晴"`
    pub fn condition(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

/// A heat-colored table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub background: Rgb,
    pub foreground: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    /// Index into the hourly arrays.
    pub index: usize,
    pub time: String,
    pub condition: String,
    pub temperature: Cell,
    pub precipitation: Cell,
    pub wind_speed: Cell,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub coordinates: String,
    pub status: Status,
    pub location: String,
    pub observed_at: String,
    pub timezone: String,
    pub current: Option<CurrentCard>,
    pub forecast: Vec<ForecastRow>,
}

impl ViewState {
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn set_coordinates(&mut self, coordinate: &Coordinate) {
        self.coordinates = format!("緯度 {:.4} / 経度 {:.4}", coordinate.lat, coordinate.lng);
    }

    pub fn set_location(&mut self, name: impl Into<String>) {
        self.location = name.into();
    }

    /// Fill the "now" card and the observation time.
    pub fn render_current(&mut self, snapshot: &WeatherSnapshot) {
        let current = &snapshot.current;
        let units = &snapshot.current_units;
        let code = weather_code::translate(current.weather_code);

        self.timezone = snapshot.timezone.clone();
        self.observed_at = format_local_time(
            &current.time,
            &snapshot.timezone,
            snapshot.timezone_abbreviation.as_deref(),
        );
        self.current = Some(CurrentCard {
            icon: code.icon,
            label: code.label,
            temperature: format!("{}{}", current.temperature_2m, units.temperature_2m),
            humidity: format!("{}{}", current.relative_humidity_2m, units.relative_humidity_2m),
            precipitation: format!("{} {}", current.precipitation, units.precipitation),
            wind_speed: format!("{} {}", current.wind_speed_10m, units.wind_speed_10m),
        });
    }

    /// Rebuild the forecast table from scratch.
    pub fn render_forecast(&mut self, snapshot: &WeatherSnapshot) {
        let hourly = &snapshot.hourly;
        let window = forecast_window(hourly, &snapshot.current.time);

        let temps = &hourly.temperature_2m[window.clone()];
        let precip = &hourly.precipitation[window.clone()];
        let wind = &hourly.wind_speed_10m[window.clone()];
        let domains = [
            Category::Temperature.domain(temps),
            Category::Precipitation.domain(precip),
            Category::Wind.domain(wind),
        ];

        self.forecast = window
            .map(|i| ForecastRow {
                index: i,
                time: format_hour_label(&hourly.time[i]),
                condition: weather_code::translate(hourly.weather_code[i]).display(),
                temperature: heat_cell(
                    hourly.temperature_2m[i],
                    format!("{:.1}°", hourly.temperature_2m[i]),
                    domains[0],
                    Category::Temperature,
                ),
                precipitation: heat_cell(
                    hourly.precipitation[i],
                    format!("{:.1}", hourly.precipitation[i]),
                    domains[1],
                    Category::Precipitation,
                ),
                wind_speed: heat_cell(
                    hourly.wind_speed_10m[i],
                    format!("{:.1}", hourly.wind_speed_10m[i]),
                    domains[2],
                    Category::Wind,
                ),
            })
            .collect();
    }
}

fn heat_cell(value: f64, text: String, (min, max): (f64, f64), category: Category) -> Cell {
    let background = interpolate(value, min, max, category);
    Cell {
        text,
        background,
        foreground: contrast_color(background),
    }
}

/// Rows to show: up to [`FORECAST_HOURS`] hours starting at the entry for
/// `current_time`, or at the first entry when no hour matches.
pub fn forecast_window(hourly: &HourlySeries, current_time: &str) -> Range<usize> {
    let len = hourly.len();
    let start = current_index(&hourly.time[..len], current_time).unwrap_or(0);
    start..(start + FORECAST_HOURS).min(len)
}

/// Exact timestamp first; otherwise the hourly slot of the same hour, since
/// `current.time` is reported at 15 minute resolution.
fn current_index(times: &[String], current_time: &str) -> Option<usize> {
    if let Some(i) = times.iter().position(|t| t == current_time) {
        return Some(i);
    }

    let now = NaiveDateTime::parse_from_str(current_time, TIME_FORMAT).ok()?;
    let hour = now.with_minute(0)?;
    times.iter().position(|t| {
        NaiveDateTime::parse_from_str(t, TIME_FORMAT).is_ok_and(|slot| slot == hour)
    })
}

/// `2024-05-01T12:00` in `Asia/Tokyo` → `2024年5月1日 12:00 (JST)`.
///
/// Open-Meteo already reports wall-clock time for the requested zone, so the
/// string is interpreted as local time there. Unparseable input is returned
/// unchanged.
pub fn format_local_time(time: &str, timezone: &str, abbreviation: Option<&str>) -> String {
    let Ok(naive) = NaiveDateTime::parse_from_str(time, TIME_FORMAT) else {
        return time.to_string();
    };

    const LOCAL: &str = "%Y年%-m月%-d日 %H:%M";
    if let Ok(tz) = timezone.parse::<Tz>() {
        if let Some(local) = tz.from_local_datetime(&naive).earliest() {
            return local.format(&format!("{LOCAL} (%Z)")).to_string();
        }
    }

    let zone = abbreviation.filter(|a| !a.is_empty()).unwrap_or(timezone);
    if zone.is_empty() {
        naive.format(LOCAL).to_string()
    } else {
        format!("{} ({zone})", naive.format(LOCAL))
    }
}

/// `2024-05-01T12:00` → `5/1 12:00`
pub fn format_hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, TIME_FORMAT)
        .map(|t| t.format("%-m/%-d %H:%M").to_string())
        .unwrap_or_else(|_| time.to_string())
}

/// Small HTML fragment for the marker popup.
pub fn popup_html(location: &str, snapshot: &WeatherSnapshot) -> String {
    let code: WeatherCode = weather_code::translate(snapshot.current.weather_code);
    format!(
        "<strong>{}</strong><br>{} {}{}",
        escape_html(location),
        code.display(),
        snapshot.current.temperature_2m,
        escape_html(&snapshot.current_units.temperature_2m),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{CurrentConditions, CurrentUnits};

    pub(crate) fn snapshot_with_hours(hours: usize, current_index: usize) -> WeatherSnapshot {
        let base = NaiveDateTime::parse_from_str("2024-05-01T00:00", TIME_FORMAT)
            .expect("valid base time");
        let time: Vec<String> = (0..hours)
            .map(|h| (base + chrono::Duration::hours(h as i64)).format(TIME_FORMAT).to_string())
            .collect();
        let current_time = time.get(current_index).cloned().unwrap_or_default();

        WeatherSnapshot {
            current: CurrentConditions {
                time: current_time,
                temperature_2m: 20.0,
                relative_humidity_2m: 55.0,
                precipitation: 0.0,
                wind_speed_10m: 7.2,
                weather_code: 0,
            },
            hourly: HourlySeries {
                temperature_2m: (0..hours).map(|h| 10.0 + h as f64 * 0.5).collect(),
                precipitation: (0..hours).map(|h| (h % 4) as f64).collect(),
                wind_speed_10m: (0..hours).map(|h| h as f64).collect(),
                weather_code: (0..hours).map(|h| if h % 2 == 0 { 0 } else { 61 }).collect(),
                time,
            },
            timezone: "Asia/Tokyo".to_string(),
            timezone_abbreviation: Some("JST".to_string()),
            current_units: CurrentUnits::default(),
        }
    }

    #[test]
    fn window_starts_at_current_hour() {
        let snap = snapshot_with_hours(48, 5);
        assert_eq!(forecast_window(&snap.hourly, &snap.current.time), 5..29);
    }

    #[test]
    fn window_is_capped_at_array_bounds() {
        let snap = snapshot_with_hours(20, 5);
        let window = forecast_window(&snap.hourly, &snap.current.time);
        assert_eq!(window, 5..20);
        assert_eq!(window.len(), (20 - 5).min(FORECAST_HOURS));
    }

    #[test]
    fn window_defaults_to_first_hour_when_no_match() {
        let snap = snapshot_with_hours(48, 5);
        assert_eq!(forecast_window(&snap.hourly, "1999-01-01T00:00"), 0..24);
        assert_eq!(forecast_window(&snap.hourly, "garbage"), 0..24);
    }

    #[test]
    fn window_matches_quarter_hour_current_time() {
        let snap = snapshot_with_hours(48, 0);
        assert_eq!(forecast_window(&snap.hourly, "2024-05-01T07:45"), 7..31);
    }

    #[test]
    fn window_ignores_ragged_tail() {
        let mut snap = snapshot_with_hours(30, 10);
        snap.hourly.weather_code.truncate(25);
        assert_eq!(forecast_window(&snap.hourly, &snap.current.time), 10..25);
    }

    #[test]
    fn rendered_table_has_one_row_per_window_hour() {
        let snap = snapshot_with_hours(20, 5);
        let mut view = ViewState::default();
        view.render_forecast(&snap);

        assert_eq!(view.forecast.len(), 15);
        assert_eq!(view.forecast[0].index, 5);
        assert_eq!(view.forecast[0].time, "5/1 05:00");
        assert_eq!(view.forecast[0].condition, "🌦️ 弱い雨");
        assert_eq!(view.forecast.last().map(|r| r.index), Some(19));
    }

    #[test]
    fn forecast_cells_are_heat_colored_within_window() {
        let snap = snapshot_with_hours(48, 5);
        let mut view = ViewState::default();
        view.render_forecast(&snap);

        let first = &view.forecast[0].temperature;
        let last = &view.forecast[23].temperature;
        assert_eq!(first.background, Category::Temperature.stops()[0].color);
        assert_eq!(last.background, Category::Temperature.stops()[2].color);
        assert_eq!(first.foreground, contrast_color(first.background));
        assert_eq!(first.text, "12.5°");
    }

    #[test]
    fn render_current_fills_card() {
        let snap = snapshot_with_hours(48, 12);
        let mut view = ViewState::default();
        view.render_current(&snap);

        let card = view.current.expect("card rendered");
        assert_eq!(card.condition(), "☀️ 快晴");
        assert_eq!(card.temperature, "20°C");
        assert_eq!(card.humidity, "55%");
        assert_eq!(card.precipitation, "0 mm");
        assert_eq!(card.wind_speed, "7.2 km/h");
        assert_eq!(view.observed_at, "2024年5月1日 12:00 (JST)");
        assert_eq!(view.timezone, "Asia/Tokyo");
    }

    #[test]
    fn local_time_falls_back_to_abbreviation_for_unknown_zone() {
        assert_eq!(
            format_local_time("2024-05-01T09:30", "Mars/Olympus", Some("MST")),
            "2024年5月1日 09:30 (MST)"
        );
        assert_eq!(format_local_time("not a time", "Asia/Tokyo", None), "not a time");
    }

    #[test]
    fn popup_escapes_location() {
        let snap = snapshot_with_hours(2, 0);
        assert_eq!(
            popup_html("A & <B>", &snap),
            "<strong>A &amp; &lt;B&gt;</strong><br>☀️ 快晴 20°C"
        );
    }

    #[test]
    fn status_messages_are_localized() {
        assert!(Status::Failed.is_error());
        assert!(!Status::Success.is_error());
        assert_eq!(Status::Loading.to_string(), "天気情報を取得中...");
    }
}
