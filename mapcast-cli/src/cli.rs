use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use mapcast_core::{Config, Coordinate, MapController, providers_from_config};

use crate::render::Screen;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "mapcast", version, about = "Weather for any point on the map")]
pub struct Cli {
    /// Disable colors (also honoured via NO_COLOR).
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for one point.
    Show {
        /// Latitude; clamped to [-90, 90].
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude; wrapped into [-180, 180).
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },

    /// Pick points repeatedly; the marker moves with each pick.
    Explore,

    /// Interactively edit the configuration file.
    Configure,

    /// Print the config file path and the effective settings.
    Config,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let colored = !self.plain && std::env::var_os("NO_COLOR").is_none();

        match self.command {
            Command::Show { lat, lng } => {
                ensure_finite(lat, lng)?;
                let mut controller = build_controller()?;
                let status = controller.handle_click(lat, lng).await;
                print!("{}", Screen::new(controller.view(), controller.map(), colored));
                if status.is_error() {
                    bail!("{status}");
                }
            }
            Command::Explore => explore(colored).await?,
            Command::Configure => configure()?,
            Command::Config => {
                let path = Config::config_file_path()?;
                let cfg = Config::load()?;
                println!("# {}", path.display());
                print!("{}", cfg.to_toml()?);
            }
        }

        Ok(())
    }
}

fn build_controller() -> Result<MapController> {
    let config = Config::load()?;
    let providers = providers_from_config(&config)?;
    let mut controller = MapController::new(&config, providers);

    if let Ok((width, height)) = crossterm::terminal::size() {
        controller.handle_resize(width, height);
    }

    Ok(controller)
}

async fn explore(colored: bool) -> Result<()> {
    let mut controller = build_controller()?;
    let center = controller.map().center;
    println!("地図の中心: {center} (zoom {})", controller.map().zoom);

    loop {
        let input = Text::new("緯度, 経度:")
            .with_help_message("例: 35.6812, 139.7671  (空欄で終了)")
            .prompt()?;

        if input.trim().is_empty() {
            return Ok(());
        }

        let (lat, lng) = match parse_point(&input) {
            Ok(point) => point,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        if let Ok((width, height)) = crossterm::terminal::size() {
            controller.handle_resize(width, height);
        }
        controller.handle_click(lat, lng).await;
        println!("{}", Screen::new(controller.view(), controller.map(), colored));
    }
}

/// Parse `"lat, lng"` or `"lat lng"`.
fn parse_point(input: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let [lat, lng] = parts.as_slice() else {
        return Err(anyhow!("Expected two numbers: latitude and longitude, got '{input}'"));
    };

    let lat: f64 = lat.parse().with_context(|| format!("Invalid latitude '{lat}'"))?;
    let lng: f64 = lng.parse().with_context(|| format!("Invalid longitude '{lng}'"))?;
    ensure_finite(lat, lng)?;

    Ok((lat, lng))
}

/// NaN and infinities parse as `f64` but cannot be normalized or sent upstream.
fn ensure_finite(lat: f64, lng: f64) -> Result<()> {
    if !lat.is_finite() || !lng.is_finite() {
        bail!("Coordinates must be finite numbers, got ({lat}, {lng})");
    }
    Ok(())
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let language = Text::new("地名の言語 (accept-language):")
        .with_default(&cfg.language)
        .prompt()?;
    cfg.language = language;

    let lat = CustomType::<f64>::new("初期表示の緯度:")
        .with_default(cfg.default_center.lat)
        .prompt()?;
    let lng = CustomType::<f64>::new("初期表示の経度:")
        .with_default(cfg.default_center.lng)
        .prompt()?;
    cfg.default_center = Coordinate::normalized(lat, lng);

    cfg.default_zoom = CustomType::<u8>::new("初期ズーム (0-19):")
        .with_default(cfg.default_zoom)
        .prompt()?;

    let timeout = CustomType::<u64>::new("タイムアウト秒 (0 = なし):")
        .with_default(cfg.request_timeout_secs.unwrap_or(0))
        .prompt()?;
    cfg.request_timeout_secs = (timeout > 0).then_some(timeout);

    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
