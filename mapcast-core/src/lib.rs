//! Core library for `mapcast`: pick a point on a map, get its weather.
//!
//! This crate defines:
//! - Coordinate normalization and map state (tile layer, marker)
//! - Clients for the forecast and reverse-geocoding services
//! - Weather code labels and heatmap colors
//! - The view model and the controller that drives a click
//!
//! It is used by `mapcast-cli`, but the controller works with any front end
//! that can paint a [`ViewState`].

pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod geo;
pub mod map;
pub mod model;
pub mod provider;
pub mod view;
pub mod weather_code;

pub use config::Config;
pub use controller::MapController;
pub use error::FetchError;
pub use geo::Coordinate;
pub use model::WeatherSnapshot;
pub use provider::{Geocoder, Providers, WeatherProvider, providers_from_config};
pub use view::{Status, ViewState};
