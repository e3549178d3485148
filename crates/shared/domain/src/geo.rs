use serde::{Deserialize, Serialize};

/// Mean Earth radius in miles, used to convert a surface distance to a
/// spherical radius.
pub const EARTH_RADIUS_MILES: f64 = 3963.2;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A geocoded coordinate pair (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// GeoJSON-ordered coordinates (`[longitude, latitude]`).
    #[must_use]
    pub const fn coordinates(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Converts a surface distance in miles into the equivalent spherical radius
/// expressed in meters, via the radians form (`distance / earth radius`).
#[must_use]
pub fn radius_meters_from_miles(distance_miles: f64) -> f64 {
    let radians = distance_miles / EARTH_RADIUS_MILES;
    radians * EARTH_RADIUS_METERS
}
