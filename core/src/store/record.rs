use crate::math::{khz_to_mhz, FrequencyInterval, GeoPoint};
use serde::{Deserialize, Serialize};

/// Whether a licensed entry transmits or receives on its frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceRole {
    Transmitter,
    Receiver,
    Unknown,
}

impl DeviceRole {
    /// Maps the dataset's single-letter device code (`T` / `R`).
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "T" => DeviceRole::Transmitter,
            "R" => DeviceRole::Receiver,
            _ => DeviceRole::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceRole::Transmitter => "Transmitter",
            DeviceRole::Receiver => "Receiver",
            DeviceRole::Unknown => "Unknown",
        }
    }
}

/// Position of a record inside its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub usize);

/// One normalized spectrum allocation.
///
/// Coordinates are rounded on construction and the occupied frequency interval
/// is derived from centre and bandwidth, so `min <= center <= max` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: RecordId,
    source_row: usize,
    device_role: DeviceRole,
    latitude: f64,
    longitude: f64,
    center_frequency_mhz: f64,
    bandwidth_khz: f64,
    min_frequency_mhz: f64,
    max_frequency_mhz: f64,
    licence_no: Option<String>,
    site_id: Option<String>,
}

/// Identifying and display fields shared by every record cut from one row.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordLabels {
    pub licence_no: Option<String>,
    pub site_id: Option<String>,
}

impl Record {
    pub(crate) fn new(
        id: RecordId,
        source_row: usize,
        device_role: DeviceRole,
        point: GeoPoint,
        center_frequency_mhz: f64,
        bandwidth_khz: f64,
        labels: RecordLabels,
    ) -> Self {
        let point = point.normalized();
        let band = FrequencyInterval::around(center_frequency_mhz, bandwidth_khz);
        Self {
            id,
            source_row,
            device_role,
            latitude: point.latitude,
            longitude: point.longitude,
            center_frequency_mhz,
            bandwidth_khz,
            min_frequency_mhz: band.min_mhz,
            max_frequency_mhz: band.max_mhz,
            licence_no: labels.licence_no,
            site_id: labels.site_id,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn source_row(&self) -> usize {
        self.source_row
    }

    pub fn device_role(&self) -> DeviceRole {
        self.device_role
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn center_frequency_mhz(&self) -> f64 {
        self.center_frequency_mhz
    }

    pub fn bandwidth_khz(&self) -> f64 {
        self.bandwidth_khz
    }

    pub fn bandwidth_mhz(&self) -> f64 {
        khz_to_mhz(self.bandwidth_khz)
    }

    pub fn min_frequency_mhz(&self) -> f64 {
        self.min_frequency_mhz
    }

    pub fn max_frequency_mhz(&self) -> f64 {
        self.max_frequency_mhz
    }

    pub fn band(&self) -> FrequencyInterval {
        FrequencyInterval::new(self.min_frequency_mhz, self.max_frequency_mhz)
    }

    pub fn licence_no(&self) -> Option<&str> {
        self.licence_no.as_deref()
    }

    pub fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref()
    }
}
