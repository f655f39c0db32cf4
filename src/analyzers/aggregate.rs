//! Groupby aggregations over the daily rental records.
//!
//! Each function is a pure projection from a slice of records to one result
//! table. Categorical groups appear in natural key order; month and weekday
//! tables follow the fixed calendar orderings declared on their key enums.

use std::collections::BTreeMap;

use crate::analyzers::types::{
    MonthlyTrendRow, SeasonRow, UserTotals, WeatherRow, WeekdayRow, WorkingDayRow, YearRow,
};
use crate::records::{Month, RentalRecord, Weekday};

/// Sums registered and casual users over every row.
pub fn total_users(records: &[RentalRecord]) -> UserTotals {
    let total_registered: u64 = records.iter().map(|r| r.registered).sum();
    let total_casual: u64 = records.iter().map(|r| r.casual).sum();
    UserTotals {
        total_registered,
        total_casual,
        total_combined: total_registered + total_casual,
    }
}

/// Registered/casual sums per season, for seasons present in the data.
pub fn season_pattern(records: &[RentalRecord]) -> Vec<SeasonRow> {
    let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.season.as_str()).or_default();
        entry.0 += r.registered;
        entry.1 += r.casual;
    }
    groups
        .into_iter()
        .map(|(season, (registered, casual))| SeasonRow {
            season: season.to_string(),
            registered,
            casual,
        })
        .collect()
}

/// Registered/casual sums per weather situation present in the data.
pub fn weather_pattern(records: &[RentalRecord]) -> Vec<WeatherRow> {
    let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.weathersit.as_str()).or_default();
        entry.0 += r.registered;
        entry.1 += r.casual;
    }
    groups
        .into_iter()
        .map(|(weathersit, (registered, casual))| WeatherRow {
            weathersit: weathersit.to_string(),
            registered,
            casual,
        })
        .collect()
}

/// Total rentals per year.
pub fn year_totals(records: &[RentalRecord]) -> Vec<YearRow> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for r in records {
        *groups.entry(r.yr.as_str()).or_default() += r.cnt;
    }
    groups
        .into_iter()
        .map(|(yr, cnt)| YearRow {
            yr: yr.to_string(),
            cnt,
        })
        .collect()
}

/// Total rentals per (year, month). Months sort in calendar order within
/// each year no matter where they first appear in the input.
pub fn monthly_trend(records: &[RentalRecord]) -> Vec<MonthlyTrendRow> {
    let mut groups: BTreeMap<(&str, Month), u64> = BTreeMap::new();
    for r in records {
        *groups.entry((r.yr.as_str(), r.mnth)).or_default() += r.cnt;
    }
    groups
        .into_iter()
        .map(|((yr, mnth), cnt)| MonthlyTrendRow {
            yr: yr.to_string(),
            mnth,
            cnt,
        })
        .collect()
}

/// Total rentals per weekday from the dataset's weekday column, always in
/// Sunday..Saturday order. Days with no rows report a zero total; an empty
/// input yields an empty table.
pub fn weekday_pattern(records: &[RentalRecord]) -> Vec<WeekdayRow> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut sums = [0u64; 7];
    for r in records {
        sums[r.weekday as usize] += r.cnt;
    }
    Weekday::ALL
        .iter()
        .map(|&weekday| WeekdayRow {
            weekday,
            cnt: sums[weekday as usize],
        })
        .collect()
}

/// Total rentals for working days vs. days off, for flags present in the
/// data; days off sort first.
pub fn workingday_pattern(records: &[RentalRecord]) -> Vec<WorkingDayRow> {
    let mut groups: BTreeMap<bool, u64> = BTreeMap::new();
    for r in records {
        *groups.entry(r.workingday).or_default() += r.cnt;
    }
    groups
        .into_iter()
        .map(|(workingday, cnt)| WorkingDayRow { workingday, cnt })
        .collect()
}
