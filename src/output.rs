//! Output formatting and persistence for aggregation tables.
//!
//! Supports pretty-printed JSON on stdout, JSON files, and CSV tables the
//! chart layer can consume directly.

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty JSON to a file, creating parent directories as
/// needed.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path, "JSON written");
    Ok(())
}

/// Writes rows as a CSV table with a header derived from the row type.
///
/// An empty row set produces an empty file; the chart layer treats that as
/// an empty panel.
pub fn write_table_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(path, rows = rows.len(), "CSV table written");
    Ok(())
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::WeekdayRow;
    use crate::records::Weekday;
    use std::env;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_write_json_creates_file() {
        let path = temp_path("bikeshare_insights_test_write.json");
        let _ = fs::remove_file(&path); // clean up any prior run

        let rows = vec![WeekdayRow {
            weekday: Weekday::Sunday,
            cnt: 7034,
        }];
        write_json(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Sunday"));
        assert!(content.contains("7034"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_table_csv_header_and_rows() {
        let path = temp_path("bikeshare_insights_test_table.csv");
        let _ = fs::remove_file(&path);

        let rows = vec![
            WeekdayRow {
                weekday: Weekday::Sunday,
                cnt: 10,
            },
            WeekdayRow {
                weekday: Weekday::Monday,
                cnt: 20,
            },
        ];
        write_table_csv(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("weekday"));
        assert!(lines[1].starts_with("Sunday"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_table_csv_empty_rows() {
        let path = temp_path("bikeshare_insights_test_empty.csv");
        let _ = fs::remove_file(&path);

        let rows: Vec<WeekdayRow> = Vec::new();
        write_table_csv(&path, &rows).unwrap();

        assert!(Path::new(&path).exists());
        assert!(fs::read_to_string(&path).unwrap().is_empty());

        fs::remove_file(&path).unwrap();
    }
}
