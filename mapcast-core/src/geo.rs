use serde::{Deserialize, Serialize};

/// A point on the map, always kept in the canonical range
/// `lat ∈ [-90, 90]`, `lng ∈ [-180, 180)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate from raw map input: latitude is clamped,
    /// longitude is wrapped modulo 360.
    pub fn normalized(lat: f64, lng: f64) -> Self {
        Self {
            lat: clamp_latitude(lat),
            lng: wrap_longitude(lng),
        }
    }

    /// `"35.6812, 139.7671"`, used as the readout and as the place-name fallback.
    pub fn formatted(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

pub fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..180.0).contains(&lng) {
        return lng;
    }
    let wrapped = (lng + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}
