use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the spherical distance model.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of decimal places coordinates are normalized to.
pub const COORDINATE_DECIMALS: i32 = 6;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Same point with both axes rounded to [`COORDINATE_DECIMALS`].
    pub fn normalized(self) -> Self {
        Self {
            latitude: round_coordinate(self.latitude),
            longitude: round_coordinate(self.longitude),
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self, other)
    }
}

/// Rounds to [`COORDINATE_DECIMALS`] places.
pub fn round_coordinate(value: f64) -> f64 {
    // Exact .5e-6 ties round away from zero rather than to even; accepted.
    let scale = 10f64.powi(COORDINATE_DECIMALS);
    (value * scale).round() / scale
}

/// Great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// This is a spherical approximation; it is not a geodesic on the ellipsoid.
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
