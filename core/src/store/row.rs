use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single cell as handed over by whatever parsed the source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Finite numeric value, accepting numeric text such as `" 153.5 "`.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(value) => *value,
            RawValue::Text(text) => text.trim().parse::<f64>().ok()?,
            RawValue::Null | RawValue::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Non-empty display text. Whole numbers render without a fraction so a
    /// licence number read as `12345.0` comes back as `"12345"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawValue::Number(value) if !value.is_finite() => None,
            RawValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                Some(format!("{}", *value as i64))
            }
            RawValue::Number(value) => Some(value.to_string()),
            RawValue::Bool(flag) => Some(flag.to_string()),
            RawValue::Null => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

/// One source row: column name to cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(HashMap<String, RawValue>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for assembling rows by hand.
    pub fn with(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<RawValue>) {
        self.0.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(RawValue::as_number)
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(RawValue::as_text)
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        RawRow(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Names of the dataset columns the store reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub latitude: String,
    pub longitude: String,
    pub bandwidth_khz: String,
    pub frequency: String,
    pub device_type: String,
    pub tx_frequency: String,
    pub rx_frequency: String,
    pub licence_no: String,
    pub site_id: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            latitude: "Latitude".into(),
            longitude: "Longitude".into(),
            bandwidth_khz: "Bandwidth_kHz".into(),
            frequency: "Frequency".into(),
            device_type: "Device_Type".into(),
            tx_frequency: "Tx_Frequency".into(),
            rx_frequency: "Rx_Frequency".into(),
            licence_no: "Licence_No".into(),
            site_id: "Site_Id".into(),
        }
    }
}
