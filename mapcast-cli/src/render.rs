//! Paints a [`ViewState`] to the terminal.

use std::fmt;

use crossterm::style::{Color, Stylize};
use mapcast_core::{
    Status, ViewState,
    color::Rgb,
    map::MapView,
    view::{Cell, ForecastRow},
};

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Everything the page would show: readout, status, panels, table.
///
/// Printed through [`std::fmt::Display`], e.g. `print!("{}", Screen::new(..))`.
pub struct Screen<'a> {
    view: &'a ViewState,
    map: &'a MapView,
    colored: bool,
}

impl<'a> Screen<'a> {
    pub fn new(view: &'a ViewState, map: &'a MapView, colored: bool) -> Self {
        Self { view, map, colored }
    }
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Screen { view, map, colored } = *self;

        writeln!(f, "座標: {}", view.coordinates)?;
        writeln!(f, "{}", status_line(view.status, colored))?;

        if let Some(marker) = map.marker() {
            let tile = map.tile_layer.url_for(&marker.position, map.zoom);
            writeln!(f, "タイル: {tile}")?;
        }
        writeln!(f, "{}", map.tile_layer.attribution)?;

        let Some(card) = &view.current else {
            return Ok(());
        };

        writeln!(f)?;
        writeln!(f, "場所: {}", view.location)?;
        writeln!(f, "日時: {}", view.observed_at)?;
        if !view.timezone.is_empty() {
            writeln!(f, "タイムゾーン: {}", view.timezone)?;
        }
        writeln!(f, "天気: {}", card.condition())?;
        writeln!(f, "気温: {}", card.temperature)?;
        writeln!(f, "湿度: {}", card.humidity)?;
        writeln!(f, "降水量: {}", card.precipitation)?;
        writeln!(f, "風速: {}", card.wind_speed)?;

        if !view.forecast.is_empty() {
            writeln!(f)?;
            writeln!(f, "{:<12} {:>8} {:>8} {:>8}  天気", "時刻", "気温", "降水mm", "風km/h")?;
            for row in &view.forecast {
                writeln!(f, "{}", forecast_line(row, colored))?;
            }
        }

        Ok(())
    }
}

fn status_line(status: Status, colored: bool) -> String {
    let text = status.message();
    if !colored {
        return text.to_string();
    }
    match status {
        Status::Success => text.green().to_string(),
        Status::Loading => text.yellow().to_string(),
        s if s.is_error() => text.red().to_string(),
        _ => text.to_string(),
    }
}

fn forecast_line(row: &ForecastRow, colored: bool) -> String {
    format!(
        "{:<12} {} {} {}  {}",
        row.time,
        heat(&row.temperature, colored),
        heat(&row.precipitation, colored),
        heat(&row.wind_speed, colored),
        row.condition,
    )
}

fn heat(cell: &Cell, colored: bool) -> String {
    let padded = format!("{:>8}", cell.text);
    if colored {
        padded
            .with(term_color(cell.foreground))
            .on(term_color(cell.background))
            .to_string()
    } else {
        padded
    }
}
