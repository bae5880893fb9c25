//! Export of committed records to run artifacts.
//!
//! Each entity kind becomes one CSV file named after its table. Record keys
//! come back from serialization in sorted order, so column layout is stable
//! across runs.

use std::fs::{File, create_dir_all};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use taskseed_core::{EntityKind, MemoryStore, Record};
use taskseed_generate::RunReport;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write one CSV per non-empty entity kind plus `report.json`, returning
/// the paths written.
pub fn write_run_artifacts(
    out_dir: &Path,
    store: &MemoryStore,
    report: &RunReport,
) -> Result<Vec<PathBuf>, ExportError> {
    create_dir_all(out_dir)?;
    let mut written = Vec::new();

    for kind in EntityKind::ALL {
        let records = store.records(kind);
        if records.is_empty() {
            continue;
        }
        let path = out_dir.join(format!("{}.csv", kind.table_name()));
        write_records_csv(&path, records)?;
        written.push(path);
    }

    let report_path = out_dir.join("report.json");
    let file = BufWriter::new(File::create(&report_path)?);
    serde_json::to_writer_pretty(file, report)?;
    written.push(report_path);

    Ok(written)
}

fn write_records_csv(path: &Path, records: &[Record]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(BufWriter::new(File::create(path)?));

    let header: Vec<&str> = match records.first() {
        Some(record) => record.keys().map(String::as_str).collect(),
        None => return Ok(()),
    };
    writer.write_record(&header)?;

    for record in records {
        let row: Vec<String> = header
            .iter()
            .map(|column| record.get(*column).map(csv_cell).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn csv_round_trips_nulls_as_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        let records = vec![
            record(&[("id", json!("a")), ("due", Value::Null)]),
            record(&[("id", json!("b")), ("due", json!("2026-01-01"))]),
        ];
        write_records_csv(&path, &records).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["due,id", ",a", "2026-01-01,b"]);
    }
}
