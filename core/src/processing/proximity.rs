use crate::math::{haversine_km, GeoPoint};
use crate::prelude::{FilterStage, StageVerdict};
use crate::store::Record;

/// Keeps records within `radius_km` of a centre point (haversine distance).
pub struct ProximityStage {
    center: GeoPoint,
    radius_km: f64,
}

impl ProximityStage {
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        Self { center, radius_km }
    }
}

impl FilterStage for ProximityStage {
    fn name(&self) -> &'static str {
        "proximity"
    }

    fn check(&self, record: &Record) -> StageVerdict {
        let distance = haversine_km(&self.center, &record.point());
        if distance <= self.radius_km {
            StageVerdict::AcceptAt(distance)
        } else {
            StageVerdict::Reject
        }
    }
}
