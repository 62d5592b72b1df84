use crate::math::FrequencyInterval;
use crate::prelude::{FilterStage, StageVerdict};
use crate::store::Record;

/// Keeps records whose occupied interval touches the queried band.
pub struct FrequencyStage {
    band: FrequencyInterval,
}

impl FrequencyStage {
    pub fn new(band: FrequencyInterval) -> Self {
        Self { band }
    }
}

impl FilterStage for FrequencyStage {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn check(&self, record: &Record) -> StageVerdict {
        if record.band().overlaps(&self.band) {
            StageVerdict::Accept
        } else {
            StageVerdict::Reject
        }
    }
}
