use super::record::{DeviceRole, Record, RecordId, RecordLabels};
use super::row::{ColumnMapping, RawRow};
use super::RecordStore;
use crate::math::GeoPoint;
use crate::prelude::DataFormatError;
use serde::Serialize;

/// Data-quality summary of a store build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub rows_read: usize,
    pub records: usize,
    /// Rows skipped for missing coordinates, bandwidth or frequency.
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// One `Frequency` column plus a `Device_Type` code per row.
    Single,
    /// Separate transmit/receive frequency columns, one record per present side.
    Split,
}

/// Builds a store using the default column names.
pub fn build_store(rows: &[RawRow]) -> Result<(RecordStore, BuildReport), DataFormatError> {
    build_store_with(rows, &ColumnMapping::default())
}

/// Builds a store, reading columns through `columns`.
///
/// Fails only when a required column is missing from every row. Rows with
/// unusable values are skipped and counted in the returned report.
pub fn build_store_with(
    rows: &[RawRow],
    columns: &ColumnMapping,
) -> Result<(RecordStore, BuildReport), DataFormatError> {
    if rows.is_empty() {
        return Ok((RecordStore::default(), BuildReport::default()));
    }

    let layout = detect_layout(rows, columns)?;
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped_rows = 0;

    for (source_row, row) in rows.iter().enumerate() {
        let before = records.len();
        if let Some(point) = coordinates(row, columns) {
            if let Some(bandwidth_khz) = row
                .number(&columns.bandwidth_khz)
                .filter(|bandwidth| *bandwidth >= 0.0)
            {
                for (role, center_mhz) in carriers(row, columns, layout) {
                    let labels = RecordLabels {
                        licence_no: row.text(&columns.licence_no),
                        site_id: row.text(&columns.site_id),
                    };
                    records.push(Record::new(
                        RecordId(records.len()),
                        source_row,
                        role,
                        point,
                        center_mhz,
                        bandwidth_khz,
                        labels,
                    ));
                }
            }
        }
        if records.len() == before {
            dropped_rows += 1;
        }
    }

    let report = BuildReport {
        rows_read: rows.len(),
        records: records.len(),
        dropped_rows,
    };
    Ok((RecordStore::from_records(records), report))
}

fn detect_layout(rows: &[RawRow], columns: &ColumnMapping) -> Result<Layout, DataFormatError> {
    let present = |column: &str| rows.iter().any(|row| row.contains(column));

    for required in [&columns.latitude, &columns.longitude, &columns.bandwidth_khz] {
        if !present(required.as_str()) {
            return Err(DataFormatError::MissingColumn(required.clone()));
        }
    }

    if present(columns.frequency.as_str()) {
        if !present(columns.device_type.as_str()) {
            return Err(DataFormatError::MissingColumn(columns.device_type.clone()));
        }
        return Ok(Layout::Single);
    }

    if present(columns.tx_frequency.as_str()) || present(columns.rx_frequency.as_str()) {
        Ok(Layout::Split)
    } else {
        Err(DataFormatError::MissingFrequencyColumns {
            single: columns.frequency.clone(),
            tx: columns.tx_frequency.clone(),
            rx: columns.rx_frequency.clone(),
        })
    }
}

fn coordinates(row: &RawRow, columns: &ColumnMapping) -> Option<GeoPoint> {
    let latitude = row.number(&columns.latitude)?;
    let longitude = row.number(&columns.longitude)?;
    Some(GeoPoint::new(latitude, longitude))
}

fn usable_frequency(row: &RawRow, column: &str) -> Option<f64> {
    row.number(column).filter(|mhz| *mhz > 0.0)
}

fn carriers(row: &RawRow, columns: &ColumnMapping, layout: Layout) -> Vec<(DeviceRole, f64)> {
    match layout {
        Layout::Single => {
            let role = row
                .text(&columns.device_type)
                .map(|code| DeviceRole::from_code(&code))
                .unwrap_or(DeviceRole::Unknown);
            usable_frequency(row, &columns.frequency)
                .map(|mhz| vec![(role, mhz)])
                .unwrap_or_default()
        }
        Layout::Split => [
            (DeviceRole::Transmitter, &columns.tx_frequency),
            (DeviceRole::Receiver, &columns.rx_frequency),
        ]
        .into_iter()
        .filter_map(|(role, column)| usable_frequency(row, column).map(|mhz| (role, mhz)))
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::row::RawValue;

    fn single_row(device: &str, frequency: f64, bandwidth: f64, lat: f64, lon: f64) -> RawRow {
        RawRow::new()
            .with("Device_Type", device)
            .with("Frequency", frequency)
            .with("Bandwidth_kHz", bandwidth)
            .with("Latitude", lat)
            .with("Longitude", lon)
    }

    #[test]
    fn empty_input_builds_empty_store() {
        let (store, report) = build_store(&[]).unwrap();
        assert!(store.is_empty());
        assert_eq!(report.dropped_rows, 0);
        assert_eq!(report.records, 0);
    }

    #[test]
    fn single_layout_reads_device_codes() {
        let rows = vec![
            single_row("T", 100.0, 10.0, 0.0, 0.0),
            single_row("R", 200.0, 10.0, 0.0, 0.0),
            single_row("?", 300.0, 10.0, 0.0, 0.0),
        ];
        let (store, report) = build_store(&rows).unwrap();
        let roles: Vec<_> = store.iter().map(Record::device_role).collect();
        assert_eq!(
            roles,
            vec![DeviceRole::Transmitter, DeviceRole::Receiver, DeviceRole::Unknown]
        );
        assert_eq!(report.dropped_rows, 0);
    }

    #[test]
    fn split_layout_emits_one_record_per_present_side() {
        let rows = vec![
            RawRow::new()
                .with("Tx_Frequency", 450.0)
                .with("Rx_Frequency", 460.0)
                .with("Bandwidth_kHz", 12.5)
                .with("Latitude", -28.3)
                .with("Longitude", 153.5)
                .with("Licence_No", 1_234_567.0)
                .with("Site_Id", "S-1"),
            RawRow::new()
                .with("Tx_Frequency", RawValue::Null)
                .with("Rx_Frequency", 470.0)
                .with("Bandwidth_kHz", 12.5)
                .with("Latitude", -28.3)
                .with("Longitude", 153.5),
        ];
        let (store, report) = build_store(&rows).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(report.dropped_rows, 0);

        let both: Vec<_> = store.iter().filter(|r| r.source_row() == 0).collect();
        assert_eq!(both[0].device_role(), DeviceRole::Transmitter);
        assert_eq!(both[0].center_frequency_mhz(), 450.0);
        assert_eq!(both[1].device_role(), DeviceRole::Receiver);
        assert_eq!(both[1].center_frequency_mhz(), 460.0);
        assert_eq!(both[0].point(), both[1].point());
        assert_eq!(both[1].licence_no(), Some("1234567"));
        assert_eq!(both[1].site_id(), Some("S-1"));

        let last = store.get(RecordId(2)).unwrap();
        assert_eq!(last.device_role(), DeviceRole::Receiver);
        assert_eq!(last.source_row(), 1);
    }

    #[test]
    fn unusable_rows_are_dropped_and_counted() {
        let rows = vec![
            single_row("T", 100.0, 10.0, 0.0, 0.0),
            RawRow::new()
                .with("Device_Type", "T")
                .with("Frequency", 100.0)
                .with("Bandwidth_kHz", 10.0)
                .with("Longitude", 0.0),
            single_row("T", 0.0, 10.0, 0.0, 0.0),
            single_row("R", 100.0, -1.0, 0.0, 0.0),
            single_row("R", f64::NAN, 10.0, 0.0, 0.0),
            single_row("R", 120.0, 10.0, 0.0, 0.0).with("Latitude", "  "),
        ];
        let (store, report) = build_store(&rows).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(report.rows_read, 6);
        assert_eq!(report.dropped_rows, 5);
    }

    #[test]
    fn split_row_without_any_frequency_is_dropped() {
        let rows = vec![RawRow::new()
            .with("Tx_Frequency", "")
            .with("Bandwidth_kHz", 10.0)
            .with("Latitude", 1.0)
            .with("Longitude", 1.0)];
        let (store, report) = build_store(&rows).unwrap();
        assert!(store.is_empty());
        assert_eq!(report.dropped_rows, 1);
    }

    #[test]
    fn missing_required_columns_fail_the_build() {
        let no_latitude = vec![RawRow::new()
            .with("Device_Type", "T")
            .with("Frequency", 100.0)
            .with("Bandwidth_kHz", 10.0)
            .with("Longitude", 0.0)];
        assert_eq!(
            build_store(&no_latitude).unwrap_err(),
            DataFormatError::MissingColumn("Latitude".into())
        );

        let no_device = vec![RawRow::new()
            .with("Frequency", 100.0)
            .with("Bandwidth_kHz", 10.0)
            .with("Latitude", 0.0)
            .with("Longitude", 0.0)];
        assert_eq!(
            build_store(&no_device).unwrap_err(),
            DataFormatError::MissingColumn("Device_Type".into())
        );

        let no_frequency = vec![RawRow::new()
            .with("Bandwidth_kHz", 10.0)
            .with("Latitude", 0.0)
            .with("Longitude", 0.0)];
        assert!(matches!(
            build_store(&no_frequency),
            Err(DataFormatError::MissingFrequencyColumns { .. })
        ));
    }

    #[test]
    fn custom_column_names_are_honoured() {
        let columns = ColumnMapping {
            frequency: "Freq_MHz".into(),
            device_type: "Kind".into(),
            ..Default::default()
        };
        let rows = vec![RawRow::new()
            .with("Kind", "R")
            .with("Freq_MHz", 915.0)
            .with("Bandwidth_kHz", 200.0)
            .with("Latitude", 10.0)
            .with("Longitude", 20.0)];
        let (store, _) = build_store_with(&rows, &columns).unwrap();
        assert_eq!(store.all()[0].device_role(), DeviceRole::Receiver);
    }
}
