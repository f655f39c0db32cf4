//! Result tables produced by the aggregation pass.
//!
//! Every type here is a flat, serializable row or bundle the presentation
//! layer can feed straight into a chart or metric panel.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

use crate::records::{Month, Weekday};

/// Dataset-wide user counts shown on the Users page.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserTotals {
    pub total_registered: u64,
    pub total_casual: u64,
    pub total_combined: u64,
}

/// Registered/casual sums for one season.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SeasonRow {
    pub season: String,
    pub registered: u64,
    pub casual: u64,
}

/// Registered/casual sums for one weather situation.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WeatherRow {
    pub weathersit: String,
    pub registered: u64,
    pub casual: u64,
}

/// Total rentals for one year.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct YearRow {
    pub yr: String,
    pub cnt: u64,
}

/// Total rentals for one (year, month) pair, for the trend line.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyTrendRow {
    pub yr: String,
    pub mnth: Month,
    pub cnt: u64,
}

/// Total rentals for one day of the week.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WeekdayRow {
    pub weekday: Weekday,
    pub cnt: u64,
}

/// Total rentals for working days vs. days off.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WorkingDayRow {
    pub workingday: bool,
    pub cnt: u64,
}

/// Recency/frequency/monetary summary for one calendar month bucket.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RfmRow {
    /// Bucket key rendered `YYYY-MM`.
    pub month: String,
    pub recency_days: i64,
    pub frequency: u64,
    pub monetary: u64,
}

/// Demand band a day is assigned to by a binning method.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum CountBand {
    Low,
    Medium,
    High,
}

impl CountBand {
    pub fn label(self) -> &'static str {
        match self {
            CountBand::Low => "Low",
            CountBand::Medium => "Medium",
            CountBand::High => "High",
        }
    }
}

impl fmt::Display for CountBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day tagged with its demand band.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BinnedRow {
    pub dteday: NaiveDate,
    pub cnt: u64,
    pub band: CountBand,
}

/// Complete bundle of dashboard tables, serialized as one JSON document.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub rows: usize,
    pub user_totals: UserTotals,
    pub season_pattern: Vec<SeasonRow>,
    pub weather_pattern: Vec<WeatherRow>,
    pub year_totals: Vec<YearRow>,
    pub monthly_trend: Vec<MonthlyTrendRow>,
    pub weekday_pattern: Vec<WeekdayRow>,
    pub workingday_pattern: Vec<WorkingDayRow>,
    pub rfm: Vec<RfmRow>,
}
