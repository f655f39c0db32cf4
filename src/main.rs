//! CLI entry point for the bikeshare insights tool.
//!
//! Provides one subcommand per dashboard panel (user totals, season and
//! weather patterns, trends, working-day comparison, RFM, binning) plus a
//! full-report bundle and a CSV export for the chart layer.

use anyhow::Result;
use bikeshare_insights::analyzers::{aggregate, binning, report, rfm};
use bikeshare_insights::loader;
use bikeshare_insights::output;
use bikeshare_insights::records::RentalRecord;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_insights")]
#[command(about = "Aggregates daily bike-rental records into dashboard tables", long_about = None)]
struct Cli {
    /// Path or URL of the daily rentals CSV
    #[arg(short, long, default_value = "data/day.csv")]
    data: String,

    /// Inclusive start of the date range (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Inclusive end of the date range (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// File to write the JSON result to (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total registered and casual users
    Users,
    /// Registered/casual sums per season
    Seasons,
    /// Registered/casual sums per weather situation
    Weather,
    /// Total rentals per year
    Years,
    /// Total rentals per (year, month), months in calendar order
    Trend,
    /// Total rentals per weekday, Sunday through Saturday
    Weekdays,
    /// Total rentals for working days vs days off
    WorkingDays,
    /// Month-bucketed recency, frequency and monetary summary
    Rfm,
    /// Label each day Low/Medium/High with the selected binning method
    Bin {
        #[arg(short, long, value_enum, default_value_t = BinMethod::Quantile)]
        method: BinMethod,
    },
    /// Full report with every dashboard table
    Report,
    /// Write every table as CSV plus the full report as JSON
    Export {
        /// Directory the tables are written to
        #[arg(short = 'd', long, default_value = "tables")]
        output_dir: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BinMethod {
    /// Tertile cut points over the count distribution
    Quantile,
    /// Fixed cut points at 2000 and 4000 rentals
    Threshold,
    /// Weekday derived from the calendar date
    Weekday,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let records = load_dataset(&cli.data)?;
    info!(rows = records.len(), source = %cli.data, "Dataset loaded");

    let records = loader::filter_date_range(&records, cli.start, cli.end);
    if cli.start.is_some() || cli.end.is_some() {
        info!(rows = records.len(), "Date range filter applied");
    }

    let output = cli.output.as_deref();
    match cli.command {
        Commands::Users => emit(&aggregate::total_users(&records), output)?,
        Commands::Seasons => emit(&aggregate::season_pattern(&records), output)?,
        Commands::Weather => emit(&aggregate::weather_pattern(&records), output)?,
        Commands::Years => emit(&aggregate::year_totals(&records), output)?,
        Commands::Trend => emit(&aggregate::monthly_trend(&records), output)?,
        Commands::Weekdays => emit(&aggregate::weekday_pattern(&records), output)?,
        Commands::WorkingDays => emit(&aggregate::workingday_pattern(&records), output)?,
        Commands::Rfm => emit(&rfm::rfm_summary(&records), output)?,
        Commands::Bin { method } => match method {
            BinMethod::Quantile => emit(&binning::bin_by_quantile(&records)?, output)?,
            BinMethod::Threshold => emit(&binning::bin_by_threshold(&records), output)?,
            BinMethod::Weekday => emit(&binning::bin_by_weekday(&records), output)?,
        },
        Commands::Report => emit(&report::build_report(&records), output)?,
        Commands::Export { output_dir } => export_tables(&records, &output_dir)?,
    }

    Ok(())
}

/// Loads the dataset from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
fn load_dataset(source: &str) -> Result<Vec<RentalRecord>> {
    if source.starts_with("http") {
        let resp = reqwest::blocking::get(source)?.error_for_status()?;
        let bytes = resp.bytes()?;
        loader::read_records(bytes.as_ref())
    } else {
        loader::load_file(source)
    }
}

fn emit<T: Serialize>(value: &T, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => output::write_json(path, value),
        None => output::print_json(value),
    }
}

/// Writes every chart feed into `output_dir`, one CSV per table plus the
/// whole report as JSON.
#[tracing::instrument(skip(records), fields(output_dir))]
fn export_tables(records: &[RentalRecord], output_dir: &str) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    output::write_table_csv(
        &format!("{output_dir}/season_pattern.csv"),
        &aggregate::season_pattern(records),
    )?;
    output::write_table_csv(
        &format!("{output_dir}/weather_pattern.csv"),
        &aggregate::weather_pattern(records),
    )?;
    output::write_table_csv(
        &format!("{output_dir}/year_totals.csv"),
        &aggregate::year_totals(records),
    )?;
    output::write_table_csv(
        &format!("{output_dir}/monthly_trend.csv"),
        &aggregate::monthly_trend(records),
    )?;
    output::write_table_csv(
        &format!("{output_dir}/weekday_pattern.csv"),
        &aggregate::weekday_pattern(records),
    )?;
    output::write_table_csv(
        &format!("{output_dir}/workingday_pattern.csv"),
        &aggregate::workingday_pattern(records),
    )?;
    output::write_table_csv(
        &format!("{output_dir}/rfm.csv"),
        &rfm::rfm_summary(records),
    )?;
    output::write_json(
        &format!("{output_dir}/report.json"),
        &report::build_report(records),
    )?;

    info!(output_dir, "Dashboard tables exported");
    Ok(())
}
