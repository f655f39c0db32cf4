//! Discretization of daily rental counts into demand bands.

use std::collections::BTreeSet;

use anyhow::{Result, bail};

use crate::analyzers::types::{BinnedRow, CountBand, WeekdayRow};
use crate::analyzers::utility::quantile;
use crate::records::{RentalRecord, Weekday};

/// Fixed cut points for [`bin_by_threshold`], in rentals per day.
pub const THRESHOLD_MEDIUM: u64 = 2000;
pub const THRESHOLD_HIGH: u64 = 4000;

/// Tags each day Low/Medium/High by equal-frequency (tertile) cut points
/// over the count distribution.
///
/// Cut points are linear-interpolation quantiles at 1/3 and 2/3. Fewer than
/// three distinct counts cannot form three bands and is reported as an
/// error; an empty input yields an empty labeling.
pub fn bin_by_quantile(records: &[RentalRecord]) -> Result<Vec<BinnedRow>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let distinct: BTreeSet<u64> = records.iter().map(|r| r.cnt).collect();
    if distinct.len() < 3 {
        bail!(
            "quantile binning needs at least 3 distinct counts, got {}",
            distinct.len()
        );
    }

    let mut sorted: Vec<f64> = records.iter().map(|r| r.cnt as f64).collect();
    sorted.sort_by(f64::total_cmp);
    let lower_cut = quantile(&sorted, 1.0 / 3.0);
    let upper_cut = quantile(&sorted, 2.0 / 3.0);
    if lower_cut == upper_cut {
        bail!("count distribution too skewed for three bands (cut points collapse at {lower_cut})");
    }

    Ok(records
        .iter()
        .map(|r| {
            let band = match r.cnt as f64 {
                v if v <= lower_cut => CountBand::Low,
                v if v <= upper_cut => CountBand::Medium,
                _ => CountBand::High,
            };
            BinnedRow {
                dteday: r.dteday,
                cnt: r.cnt,
                band,
            }
        })
        .collect())
}

/// Tags each day by the fixed cut points 2000 and 4000.
///
/// Lower band edges are inclusive: Low is [0, 2000), Medium [2000, 4000),
/// High [4000, max]. When no day reaches 4000 the High band is dropped and
/// Medium runs up to the maximum; when no day reaches 2000 every day is Low.
pub fn bin_by_threshold(records: &[RentalRecord]) -> Vec<BinnedRow> {
    let max = records.iter().map(|r| r.cnt).max().unwrap_or(0);
    records
        .iter()
        .map(|r| {
            let band = match r.cnt {
                c if max > THRESHOLD_HIGH && c >= THRESHOLD_HIGH => CountBand::High,
                c if c >= THRESHOLD_MEDIUM => CountBand::Medium,
                _ => CountBand::Low,
            };
            BinnedRow {
                dteday: r.dteday,
                cnt: r.cnt,
                band,
            }
        })
        .collect()
}

/// Sums counts per weekday derived from the calendar date rather than the
/// dataset's weekday column, in Sunday..Saturday order.
pub fn bin_by_weekday(records: &[RentalRecord]) -> Vec<WeekdayRow> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut sums = [0u64; 7];
    for r in records {
        sums[Weekday::from_date(r.dteday) as usize] += r.cnt;
    }
    Weekday::ALL
        .iter()
        .map(|&weekday| WeekdayRow {
            weekday,
            cnt: sums[weekday as usize],
        })
        .collect()
}
