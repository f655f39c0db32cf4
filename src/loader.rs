//! CSV ingestion and date-range selection for the rentals dataset.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use tracing::{debug, warn};

use crate::records::RentalRecord;

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "dteday",
    "season",
    "weathersit",
    "workingday",
    "weekday",
    "mnth",
    "yr",
    "registered",
    "casual",
    "cnt",
];

/// Deserializes rental records from CSV data.
///
/// The header row is validated up front; the first required column that is
/// absent fails the whole load with that column named. Rows whose total
/// disagrees with registered + casual are kept and reported once.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RentalRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("input data is missing required column `{col}`");
        }
    }

    let mut records = Vec::new();
    let mut inconsistent = 0usize;
    for result in rdr.deserialize() {
        let record: RentalRecord = result?;
        if !record.is_consistent() {
            inconsistent += 1;
        }
        records.push(record);
    }

    if inconsistent > 0 {
        warn!(
            rows = inconsistent,
            "rows where cnt != registered + casual"
        );
    }
    debug!(rows = records.len(), "CSV records deserialized");

    Ok(records)
}

/// Loads rental records from a CSV file on disk.
pub fn load_file(path: &str) -> Result<Vec<RentalRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open rentals CSV at {path}"))?;
    read_records(file)
}

/// Keeps the rows whose date falls inside the inclusive `[start, end]`
/// range. A bound left as `None` is open on that side. An empty selection
/// is a valid result, not an error.
pub fn filter_date_range(
    records: &[RentalRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<RentalRecord> {
    records
        .iter()
        .filter(|r| {
            start.is_none_or(|s| r.dteday >= s) && end.is_none_or(|e| r.dteday <= e)
        })
        .cloned()
        .collect()
}

/// Earliest and latest dates in the dataset, for the range picker.
pub fn date_span(records: &[RentalRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = records.iter().map(|r| r.dteday).min()?;
    let max = records.iter().map(|r| r.dteday).max()?;
    Some((min, max))
}
