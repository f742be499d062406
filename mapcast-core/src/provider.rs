use crate::{Config, error::FetchError, geo::Coordinate, model::WeatherSnapshot};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};

pub mod nominatim;
pub mod openmeteo;

pub use nominatim::NominatimClient;
pub use openmeteo::OpenMeteoClient;

/// Source of current conditions and the hourly forecast for a point.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// `Ok(None)` means the service answered but without usable data.
    async fn fetch_weather(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Option<WeatherSnapshot>, FetchError>;
}

/// Reverse geocoder. Never fails: on error it returns a human-readable
/// placeholder so a missing place name cannot block the weather display.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn place_name(&self, coordinate: &Coordinate) -> String;
}

/// The two upstream services a map click needs.
#[derive(Debug, Clone)]
pub struct Providers {
    pub weather: Arc<dyn WeatherProvider>,
    pub geocoder: Arc<dyn Geocoder>,
}

impl Providers {
    pub fn new(weather: Arc<dyn WeatherProvider>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { weather, geocoder }
    }
}

/// Construct the Open-Meteo and Nominatim clients from config, sharing one
/// HTTP connection pool.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    let http = http_client(config)?;

    Ok(Providers {
        weather: Arc::new(OpenMeteoClient::with_client(
            http.clone(),
            config.weather_api_url.clone(),
        )),
        geocoder: Arc::new(NominatimClient::with_client(
            http,
            config.geocode_api_url.clone(),
            config.language.clone(),
            config.geocode_zoom,
        )),
    })
}

fn http_client(config: &Config) -> anyhow::Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
