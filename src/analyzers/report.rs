//! Assembles the full dashboard report from a set of rental records.

use chrono::{NaiveDate, Utc};

use crate::analyzers::aggregate::{
    monthly_trend, season_pattern, total_users, weather_pattern, weekday_pattern,
    workingday_pattern, year_totals,
};
use crate::analyzers::rfm::rfm_summary;
use crate::analyzers::types::DashboardReport;
use crate::loader::{date_span, filter_date_range};
use crate::records::RentalRecord;

/// Recomputes every dashboard table over the given records.
pub fn build_report(records: &[RentalRecord]) -> DashboardReport {
    let span = date_span(records);
    DashboardReport {
        schema_version: 1,
        generated_at: Utc::now(),
        first_day: span.map(|(min, _)| min),
        last_day: span.map(|(_, max)| max),
        rows: records.len(),
        user_totals: total_users(records),
        season_pattern: season_pattern(records),
        weather_pattern: weather_pattern(records),
        year_totals: year_totals(records),
        monthly_trend: monthly_trend(records),
        weekday_pattern: weekday_pattern(records),
        workingday_pattern: workingday_pattern(records),
        rfm: rfm_summary(records),
    }
}

/// Builds the report over the rows inside the inclusive date range, the way
/// a range selection in the menu narrows every panel at once.
pub fn build_report_for_range(
    records: &[RentalRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> DashboardReport {
    let filtered = filter_date_range(records, start, end);
    build_report(&filtered)
}
