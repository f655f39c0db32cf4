//! Recency/frequency/monetary summary over calendar-month buckets.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::analyzers::types::RfmRow;
use crate::records::RentalRecord;

/// Buckets rows by calendar (year, month) and summarizes each bucket.
///
/// Recency is measured from the latest date in the whole input to the
/// latest date inside the bucket, in days; frequency is the bucket's row
/// count; monetary is the bucket's total rental sum. Buckets come out in
/// chronological order. An empty input yields an empty table.
pub fn rfm_summary(records: &[RentalRecord]) -> Vec<RfmRow> {
    let Some(latest) = records.iter().map(|r| r.dteday).max() else {
        return Vec::new();
    };

    struct Bucket {
        latest: NaiveDate,
        frequency: u64,
        monetary: u64,
    }

    let mut buckets: BTreeMap<(i32, u32), Bucket> = BTreeMap::new();
    for r in records {
        let key = (r.dteday.year(), r.dteday.month());
        let bucket = buckets.entry(key).or_insert(Bucket {
            latest: r.dteday,
            frequency: 0,
            monetary: 0,
        });
        if r.dteday > bucket.latest {
            bucket.latest = r.dteday;
        }
        bucket.frequency += 1;
        bucket.monetary += r.cnt;
    }

    buckets
        .into_iter()
        .map(|((year, month), bucket)| RfmRow {
            month: format!("{year:04}-{month:02}"),
            recency_days: (latest - bucket.latest).num_days(),
            frequency: bucket.frequency,
            monetary: bucket.monetary,
        })
        .collect()
}
