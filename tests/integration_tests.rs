use bikeshare_insights::analyzers::aggregate::{
    monthly_trend, season_pattern, total_users, weekday_pattern, workingday_pattern, year_totals,
};
use bikeshare_insights::analyzers::binning::{bin_by_quantile, bin_by_threshold};
use bikeshare_insights::analyzers::report::{build_report, build_report_for_range};
use bikeshare_insights::analyzers::rfm::rfm_summary;
use bikeshare_insights::analyzers::types::CountBand;
use bikeshare_insights::loader::{date_span, read_records};
use bikeshare_insights::records::{Month, RentalRecord, Weekday};

fn sample_records() -> Vec<RentalRecord> {
    let bytes = include_bytes!("fixtures/sample_rentals.csv");
    read_records(&bytes[..]).expect("fixture should load")
}

#[test]
fn test_totals_match_across_tables() {
    let records = sample_records();
    let totals = total_users(&records);

    assert_eq!(totals.total_registered, 21008);
    assert_eq!(totals.total_casual, 3261);
    assert_eq!(totals.total_combined, 24269);

    // grouping drops no rows
    let seasons = season_pattern(&records);
    let registered: u64 = seasons.iter().map(|row| row.registered).sum();
    let casual: u64 = seasons.iter().map(|row| row.casual).sum();
    assert_eq!(registered, totals.total_registered);
    assert_eq!(casual, totals.total_casual);

    let years = year_totals(&records);
    let cnt: u64 = years.iter().map(|row| row.cnt).sum();
    assert_eq!(cnt, totals.total_combined);
}

#[test]
fn test_monthly_trend_is_chronological() {
    // December 2012 rows precede March 2012 rows in the fixture
    let records = sample_records();
    let trend = monthly_trend(&records);

    let keys: Vec<(String, Month)> = trend
        .iter()
        .map(|row| (row.yr.clone(), row.mnth))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("2011".to_string(), Month::Jan),
            ("2011".to_string(), Month::Feb),
            ("2012".to_string(), Month::Mar),
            ("2012".to_string(), Month::Dec),
        ]
    );
    assert_eq!(trend[0].cnt, 9371);
    assert_eq!(trend[3].cnt, 4525);
}

#[test]
fn test_weekday_pattern_has_all_seven_days_in_order() {
    let records = sample_records();
    let pattern = weekday_pattern(&records);

    assert_eq!(pattern.len(), 7);
    let days: Vec<Weekday> = pattern.iter().map(|row| row.weekday).collect();
    assert_eq!(days, Weekday::ALL.to_vec());

    assert_eq!(pattern[0].cnt, 7034); // Sundays
    assert_eq!(pattern[1].cnt, 8771); // Mondays
    assert_eq!(pattern[6].cnt, 2186); // Saturdays
}

#[test]
fn test_workingday_split() {
    let records = sample_records();
    let pattern = workingday_pattern(&records);

    assert_eq!(pattern.len(), 2);
    assert!(!pattern[0].workingday);
    assert_eq!(pattern[0].cnt, 9220);
    assert!(pattern[1].workingday);
    assert_eq!(pattern[1].cnt, 15049);
}

#[test]
fn test_rfm_buckets() {
    let records = sample_records();
    let rfm = rfm_summary(&records);

    let months: Vec<&str> = rfm.iter().map(|row| row.month.as_str()).collect();
    assert_eq!(months, vec!["2011-01", "2011-02", "2012-03", "2012-12"]);

    // first bucket: last row 2011-01-08, dataset latest 2012-12-31
    assert_eq!(rfm[0].recency_days, 723);
    assert_eq!(rfm[0].frequency, 7);
    assert_eq!(rfm[0].monetary, 9371);

    // the bucket holding the latest date
    assert_eq!(rfm[3].recency_days, 0);
    assert_eq!(rfm[3].frequency, 2);
    assert_eq!(rfm[3].monetary, 4525);
}

#[test]
fn test_quantile_bins_balance_over_fixture() {
    let records = sample_records();
    let binned = bin_by_quantile(&records).unwrap();

    let count = |band: CountBand| binned.iter().filter(|row| row.band == band).count();
    assert_eq!(count(CountBand::Low), 4);
    assert_eq!(count(CountBand::Medium), 4);
    assert_eq!(count(CountBand::High), 4);
}

#[test]
fn test_threshold_bins_over_fixture() {
    let records = sample_records();
    let binned = bin_by_threshold(&records);

    let high: Vec<u64> = binned
        .iter()
        .filter(|row| row.band == CountBand::High)
        .map(|row| row.cnt)
        .collect();
    assert_eq!(high, vec![4453, 4693]);

    let medium = binned
        .iter()
        .filter(|row| row.band == CountBand::Medium)
        .count();
    assert_eq!(medium, 1);
}

#[test]
fn test_full_range_filter_reproduces_unfiltered_report() {
    let records = sample_records();
    let (min, max) = date_span(&records).unwrap();

    let unfiltered = build_report(&records);
    let filtered = build_report_for_range(&records, Some(min), Some(max));

    assert_eq!(filtered.rows, unfiltered.rows);
    assert_eq!(filtered.user_totals, unfiltered.user_totals);
    assert_eq!(filtered.season_pattern, unfiltered.season_pattern);
    assert_eq!(filtered.weather_pattern, unfiltered.weather_pattern);
    assert_eq!(filtered.year_totals, unfiltered.year_totals);
    assert_eq!(filtered.monthly_trend, unfiltered.monthly_trend);
    assert_eq!(filtered.weekday_pattern, unfiltered.weekday_pattern);
    assert_eq!(filtered.workingday_pattern, unfiltered.workingday_pattern);
    assert_eq!(filtered.rfm, unfiltered.rfm);
}

#[test]
fn test_report_serializes_to_json() {
    let records = sample_records();
    let report = build_report(&records);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["rows"], 12);
    assert_eq!(json["first_day"], "2011-01-02");
    assert_eq!(json["last_day"], "2012-12-31");
    assert_eq!(json["user_totals"]["total_combined"], 24269);
    assert_eq!(json["monthly_trend"][0]["mnth"], "Jan");
    assert_eq!(json["weekday_pattern"][0]["weekday"], "Sunday");
}
