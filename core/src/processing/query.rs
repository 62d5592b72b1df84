use crate::math::{FrequencyInterval, GeoPoint};
use crate::prelude::InvalidQueryError;
use serde::{Deserialize, Serialize};

/// A validated search: a point, a radius around it and a frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Query {
    point: GeoPoint,
    radius_km: f64,
    band: FrequencyInterval,
}

impl Query {
    /// Validates every field; the point is rounded to the same precision as
    /// stored records so a zero radius matches exact coordinates.
    pub fn new(
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        min_freq_mhz: f64,
        max_freq_mhz: f64,
    ) -> Result<Self, InvalidQueryError> {
        check_range("latitude", latitude, -90.0, 90.0)?;
        check_range("longitude", longitude, -180.0, 180.0)?;
        check_range("radius", radius_km, 0.0, f64::MAX)?;
        check_range("min_freq", min_freq_mhz, 0.0, f64::MAX)?;
        check_range("max_freq", max_freq_mhz, 0.0, f64::MAX)?;
        if min_freq_mhz > max_freq_mhz {
            return Err(InvalidQueryError::InvertedBand {
                min: min_freq_mhz,
                max: max_freq_mhz,
            });
        }

        Ok(Self {
            point: GeoPoint::new(latitude, longitude).normalized(),
            radius_km,
            band: FrequencyInterval::new(min_freq_mhz, max_freq_mhz),
        })
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn band(&self) -> FrequencyInterval {
        self.band
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), InvalidQueryError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InvalidQueryError::OutOfRange { field, value })
    }
}

/// Query fields exactly as they arrive from a transport layer.
///
/// Key names follow the `/getData` query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    #[serde(alias = "radius_km")]
    pub radius: Option<String>,
    #[serde(alias = "min_freq_mhz")]
    pub min_freq: Option<String>,
    #[serde(alias = "max_freq_mhz")]
    pub max_freq: Option<String>,
}

impl QueryParams {
    pub fn parse(&self) -> Result<Query, InvalidQueryError> {
        Query::new(
            parse_field("latitude", self.latitude.as_deref())?,
            parse_field("longitude", self.longitude.as_deref())?,
            parse_field("radius", self.radius.as_deref())?,
            parse_field("min_freq", self.min_freq.as_deref())?,
            parse_field("max_freq", self.max_freq.as_deref())?,
        )
    }
}

fn parse_field(field: &'static str, raw: Option<&str>) -> Result<f64, InvalidQueryError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(InvalidQueryError::Missing(field))?;
    raw.parse::<f64>()
        .map_err(|_| InvalidQueryError::NotNumeric {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lat: &str, lon: &str, radius: &str, min: &str, max: &str) -> QueryParams {
        QueryParams {
            latitude: Some(lat.into()),
            longitude: Some(lon.into()),
            radius: Some(radius.into()),
            min_freq: Some(min.into()),
            max_freq: Some(max.into()),
        }
    }

    #[test]
    fn well_formed_params_parse() {
        let query = params("-28.3", "153.5", "100", "1000", "90000").parse().unwrap();
        assert_eq!(query.point(), GeoPoint::new(-28.3, 153.5));
        assert_eq!(query.radius_km(), 100.0);
        assert_eq!(query.band(), FrequencyInterval::new(1000.0, 90000.0));
    }

    #[test]
    fn missing_and_blank_fields_are_rejected() {
        let mut incomplete = params("0", "0", "1", "50", "150");
        incomplete.radius = None;
        assert_eq!(incomplete.parse(), Err(InvalidQueryError::Missing("radius")));

        assert_eq!(
            params("0", " ", "1", "50", "150").parse(),
            Err(InvalidQueryError::Missing("longitude"))
        );
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        assert_eq!(
            params("north", "0", "1", "50", "150").parse(),
            Err(InvalidQueryError::NotNumeric {
                field: "latitude",
                value: "north".into()
            })
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            Query::new(91.0, 0.0, 1.0, 0.0, 1.0),
            Err(InvalidQueryError::OutOfRange { field: "latitude", .. })
        ));
        assert!(matches!(
            Query::new(0.0, -180.5, 1.0, 0.0, 1.0),
            Err(InvalidQueryError::OutOfRange { field: "longitude", .. })
        ));
        assert!(matches!(
            Query::new(0.0, 0.0, -1.0, 0.0, 1.0),
            Err(InvalidQueryError::OutOfRange { field: "radius", .. })
        ));
        assert!(matches!(
            Query::new(0.0, 0.0, 1.0, -5.0, 1.0),
            Err(InvalidQueryError::OutOfRange { field: "min_freq", .. })
        ));
        assert!(matches!(
            Query::new(0.0, 0.0, f64::NAN, 0.0, 1.0),
            Err(InvalidQueryError::OutOfRange { field: "radius", .. })
        ));
    }

    #[test]
    fn inverted_band_is_rejected() {
        assert_eq!(
            Query::new(0.0, 0.0, 1.0, 200.0, 100.0),
            Err(InvalidQueryError::InvertedBand {
                min: 200.0,
                max: 100.0
            })
        );
        assert!(Query::new(0.0, 0.0, 0.0, 100.0, 100.0).is_ok());
    }

    #[test]
    fn point_is_rounded_to_record_precision() {
        let query = Query::new(-28.300_000_4, 153.5, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(query.point().latitude, -28.3);
    }

    #[test]
    fn params_accept_long_key_aliases() {
        let parsed: QueryParams = serde_json::from_str(
            r#"{"latitude":"1","longitude":"2","radius_km":"3","min_freq_mhz":"4","max_freq_mhz":"5"}"#,
        )
        .unwrap();
        assert_eq!(parsed, params("1", "2", "3", "4", "5"));
    }
}
