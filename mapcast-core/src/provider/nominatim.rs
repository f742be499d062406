//! Reverse geocoding via Nominatim (OpenStreetMap), free and keyless.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{FetchError, truncate_body},
    geo::Coordinate,
};

use super::Geocoder;

/// Shown in place of a name when the lookup itself fails.
pub const LOOKUP_FAILED: &str = "地名を取得できませんでした";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
}

/// Nominatim asks for an identifying `User-Agent`; build `http` with one
/// (see [`crate::providers_from_config`]).
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: Client,
    base_url: String,
    language: String,
    zoom: u8,
}

impl NominatimClient {
    pub fn with_client(http: Client, base_url: String, language: String, zoom: u8) -> Self {
        Self {
            http,
            base_url,
            language,
            zoom,
        }
    }

    async fn lookup(&self, coordinate: &Coordinate) -> Result<Option<String>, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lng.to_string()),
                ("format", "json".to_string()),
                ("accept-language", self.language.clone()),
                ("zoom", self.zoom.to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let body: NominatimResponse = serde_json::from_str(&res.text().await?)?;
        Ok(body.display_name.filter(|name| !name.trim().is_empty()))
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn place_name(&self, coordinate: &Coordinate) -> String {
        match self.lookup(coordinate).await {
            Ok(Some(name)) => {
                tracing::debug!(%coordinate, %name, "reverse geocoded");
                name
            }
            Ok(None) => coordinate.formatted(),
            Err(e) => {
                tracing::warn!(%coordinate, error = %e, "reverse geocode failed");
                LOOKUP_FAILED.to_string()
            }
        }
    }
}
