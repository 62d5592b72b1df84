pub mod geo;
pub mod interval;

pub use geo::{haversine_km, round_coordinate, GeoPoint, EARTH_RADIUS_KM};
pub use interval::{khz_to_mhz, FrequencyInterval};
