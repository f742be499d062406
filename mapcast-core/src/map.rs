//! Map state: the viewport, its single tile layer and the click marker.

use crate::geo::Coordinate;

/// Web Mercator cannot show the poles; tiles stop at this latitude.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// A raster tile source addressed by `{z}/{x}/{y}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl TileLayer {
    pub fn new(url_template: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: attribution.into(),
        }
    }

    pub fn url(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// Slippy-map tile containing `coordinate` at `zoom`.
    pub fn tile_for(coordinate: &Coordinate, zoom: u8) -> (u32, u32) {
        let n = f64::from(1u32 << zoom.min(31));
        let lat = coordinate.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();

        let x = ((coordinate.lng + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * n)
            .floor();

        let max = n - 1.0;
        (x.clamp(0.0, max) as u32, y.clamp(0.0, max) as u32)
    }

    pub fn url_for(&self, coordinate: &Coordinate, zoom: u8) -> String {
        let (x, y) = Self::tile_for(coordinate, zoom);
        self.url(zoom, x, y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    /// HTML shown when the marker popup is open.
    pub popup: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    marker: Option<Marker>,
    size: Option<(u16, u16)>,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: u8, tile_layer: TileLayer) -> Self {
        Self {
            center,
            zoom,
            tile_layer,
            marker: None,
            size: None,
        }
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// Put the marker at `position`, moving the existing one if there is one.
    /// Any open popup is closed until the caller sets a new one.
    pub fn place_marker(&mut self, position: Coordinate) -> &mut Marker {
        let marker = self.marker.get_or_insert(Marker {
            position,
            popup: None,
        });
        marker.position = position;
        marker.popup = None;
        marker
    }

    /// Recompute the viewport size after the container was resized.
    pub fn invalidate_size(&mut self, width: u16, height: u16) {
        tracing::trace!(width, height, "map size invalidated");
        self.size = Some((width, height));
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_TILE_ATTRIBUTION, DEFAULT_TILE_URL_TEMPLATE};

    fn osm() -> TileLayer {
        TileLayer::new(DEFAULT_TILE_URL_TEMPLATE, DEFAULT_TILE_ATTRIBUTION)
    }

    #[test]
    fn tile_url_fills_template() {
        assert_eq!(osm().url(6, 56, 25), "https://tile.openstreetmap.org/6/56/25.png");
    }

    #[test]
    fn tile_for_known_points() {
        let origin = Coordinate { lat: 0.0, lng: 0.0 };
        assert_eq!(TileLayer::tile_for(&origin, 1), (1, 1));
        assert_eq!(TileLayer::tile_for(&origin, 0), (0, 0));

        let tokyo = Coordinate {
            lat: 35.6812,
            lng: 139.7671,
        };
        assert_eq!(TileLayer::tile_for(&tokyo, 6), (56, 25));
    }

    #[test]
    fn tile_for_clamps_at_poles_and_antimeridian() {
        let north = Coordinate { lat: 90.0, lng: -180.0 };
        assert_eq!(TileLayer::tile_for(&north, 3), (0, 0));
        let south = Coordinate { lat: -90.0, lng: 179.999 };
        assert_eq!(TileLayer::tile_for(&south, 3), (7, 7));
    }

    #[test]
    fn marker_is_moved_not_duplicated() {
        let mut map = MapView::new(Coordinate { lat: 0.0, lng: 0.0 }, 6, osm());
        assert!(map.marker().is_none());

        map.place_marker(Coordinate { lat: 1.0, lng: 2.0 }).popup = Some("first".into());
        map.place_marker(Coordinate { lat: 3.0, lng: 4.0 });

        let marker = map.marker().expect("marker placed");
        assert_eq!(marker.position, Coordinate { lat: 3.0, lng: 4.0 });
        assert!(marker.popup.is_none());
    }

    #[test]
    fn resize_records_new_size() {
        let mut map = MapView::new(Coordinate { lat: 0.0, lng: 0.0 }, 6, osm());
        map.invalidate_size(120, 40);
        assert_eq!(map.size(), Some((120, 40)));
    }
}
