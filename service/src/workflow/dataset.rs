use anyhow::{bail, Context};
use spectrumcore::store::{RawRow, RawValue};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads dataset rows from a `.json` array of objects or a `.csv` file with a
/// header row.
pub fn load_rows<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<RawRow>> {
    let path_ref = path.as_ref();
    let extension = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => load_json(path_ref),
        Some("csv") => load_csv(path_ref),
        _ => bail!(
            "unsupported dataset format for {} (expected .json or .csv)",
            path_ref.display()
        ),
    }
}

fn load_json(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let file = File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
    let rows: Vec<RawRow> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing JSON dataset {}", path.display()))?;
    Ok(rows)
}

fn load_csv(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening dataset {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("reading CSV header of {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("reading CSV row {} of {}", index + 1, path.display()))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.trim(), csv_cell(cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

// Cells stay text; the store parses numbers itself.
fn csv_cell(cell: &str) -> RawValue {
    if cell.trim().is_empty() {
        RawValue::Null
    } else {
        RawValue::Text(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_with(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_rows_keep_blank_cells_as_null() {
        let file = temp_with(
            ".csv",
            "Licence_No,Device_Type,Frequency,Bandwidth_kHz,Latitude,Longitude\n\
             1001,T,1500.5,200,-28.3,153.5\n\
             1002,R,,25,-28.4,153.6\n",
        );
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number("Frequency"), Some(1500.5));
        assert_eq!(rows[0].text("Licence_No").as_deref(), Some("1001"));
        assert_eq!(rows[1].get("Frequency"), Some(&RawValue::Null));
    }

    #[test]
    fn json_rows_parse() {
        let file = temp_with(
            ".JSON",
            r#"[{"Device_Type":"T","Frequency":100,"Bandwidth_kHz":10,"Latitude":0,"Longitude":0}]"#,
        );
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number("Bandwidth_kHz"), Some(10.0));
    }

    #[test]
    fn unknown_extensions_are_refused() {
        let file = temp_with(".xlsx", "");
        let err = load_rows(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported dataset format"));
    }

    #[test]
    fn malformed_json_mentions_the_file() {
        let file = temp_with(".json", "{not json");
        let err = load_rows(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing JSON dataset"));
    }
}
