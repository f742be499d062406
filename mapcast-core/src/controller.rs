use tracing::Instrument;

use crate::{
    Config,
    geo::Coordinate,
    map::{MapView, TileLayer},
    provider::Providers,
    view::{self, Status, ViewState},
};

/// Owns the map and the panels and runs the click-to-weather pipeline.
///
/// Clicks take `&mut self`, so one controller handles them one at a time and a
/// slow response can never overwrite the result of a later click.
#[derive(Debug)]
pub struct MapController {
    map: MapView,
    view: ViewState,
    providers: Providers,
}

impl MapController {
    pub fn new(config: &Config, providers: Providers) -> Self {
        let tile_layer =
            TileLayer::new(config.tile_url_template.clone(), config.tile_attribution.clone());
        let map = MapView::new(config.default_center, config.default_zoom, tile_layer);

        tracing::debug!(center = %map.center, zoom = map.zoom, "map created");

        Self {
            map,
            view: ViewState::default(),
            providers,
        }
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The container changed size; let the map recompute its viewport.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.map.invalidate_size(width, height);
    }

    /// Fetch and show the weather at a clicked point. Returns the final status.
    pub async fn handle_click(&mut self, lat: f64, lng: f64) -> Status {
        let coordinate = Coordinate::normalized(lat, lng);
        let span = tracing::info_span!("click", %coordinate);
        self.click(coordinate).instrument(span).await
    }

    async fn click(&mut self, coordinate: Coordinate) -> Status {
        self.view.set_coordinates(&coordinate);
        self.view.set_status(Status::Loading);

        let (weather, location) = tokio::join!(
            self.providers.weather.fetch_weather(&coordinate),
            self.providers.geocoder.place_name(&coordinate),
        );

        let snapshot = match weather {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::warn!("weather service returned no usable data");
                self.view.set_status(Status::Failed);
                return Status::Failed;
            }
            Err(e) => {
                tracing::warn!(error = %e, "weather request failed");
                self.view.set_status(Status::Failed);
                return Status::Failed;
            }
        };

        let popup = view::popup_html(&location, &snapshot);
        self.map.place_marker(coordinate).popup = Some(popup);

        self.view.set_location(location);
        self.view.render_current(&snapshot);
        self.view.render_forecast(&snapshot);
        self.view.set_status(Status::Success);

        tracing::info!(
            location = %self.view.location,
            rows = self.view.forecast.len(),
            "weather updated"
        );
        Status::Success
    }
}
