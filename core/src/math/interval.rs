use serde::{Deserialize, Serialize};

/// Closed frequency interval in MHz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyInterval {
    pub min_mhz: f64,
    pub max_mhz: f64,
}

impl FrequencyInterval {
    pub fn new(min_mhz: f64, max_mhz: f64) -> Self {
        Self { min_mhz, max_mhz }
    }

    /// Interval occupied by a carrier of `bandwidth_khz` centred on `center_mhz`.
    pub fn around(center_mhz: f64, bandwidth_khz: f64) -> Self {
        let half_mhz = khz_to_mhz(bandwidth_khz) / 2.0;
        Self {
            min_mhz: center_mhz - half_mhz,
            max_mhz: center_mhz + half_mhz,
        }
    }

    /// Closed-interval intersection; touching endpoints overlap.
    pub fn overlaps(&self, other: &FrequencyInterval) -> bool {
        self.max_mhz >= other.min_mhz && self.min_mhz <= other.max_mhz
    }
}

pub fn khz_to_mhz(khz: f64) -> f64 {
    khz / 1000.0
}
