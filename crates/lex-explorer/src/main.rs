//! CLI entry point for the exploratory data analysis tool.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use lex_explorer::utils::truncate_str;
use lex_explorer::{
    CoercionOutcome, DataProfiler, DatasetSummary, DatetimeGranularity, ExplorerReport,
    FrequencyEntry, HistogramBucket, ProfilerConfig, ReportGenerator, Statistic, dataset_name,
    load_csv, report_base_name,
};
use polars::prelude::*;
use std::path::Path;
use tracing::{error, info};

/// Width of the longest bar in histograms and bar charts.
const BAR_WIDTH: usize = 40;

/// CLI-compatible datetime aggregation key
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliGranularity {
    /// Group datetimes by calendar day
    Day,
    /// Group datetimes by exact timestamp
    Timestamp,
}

impl From<CliGranularity> for DatetimeGranularity {
    fn from(cli: CliGranularity) -> Self {
        match cli {
            CliGranularity::Day => DatetimeGranularity::Day,
            CliGranularity::Timestamp => DatetimeGranularity::Timestamp,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Exploratory Data Analysis for CSV files",
    long_about = "Profiles every column of a CSV file and prints a summary of the \
                  whole table followed by numeric, text and datetime statistics.\n\n\
                  EXAMPLES:\n  \
                  # Basic usage\n  \
                  lex-explorer -i data.csv\n\n  \
                  # Show 10 preview rows and parse two date columns\n  \
                  lex-explorer -i data.csv -r 10 -c order_date,ship_date\n\n  \
                  # Machine-readable output\n  \
                  lex-explorer -i data.csv --json | jq .overview"
)]
struct Args {
    /// Path to the CSV file to explore
    #[arg(short, long)]
    input: String,

    /// Number of rows shown in the head, tail and sample previews
    #[arg(short, long, default_value = "5")]
    rows: usize,

    /// Text columns to convert to datetime before profiling (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    convert: Vec<String>,

    /// Number of histogram buckets for numeric columns
    #[arg(long, default_value = "10")]
    bins: usize,

    /// Number of entries in each most-frequent-values table
    #[arg(long, default_value = "10")]
    top_k: usize,

    /// Key used to aggregate datetime values
    #[arg(long, value_enum, default_value = "day")]
    granularity: CliGranularity,

    /// Output directory for --emit-report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    /// Useful for piping to other tools: `... --json | jq .overview`
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Row previews shown in the overall information section.
struct Previews {
    head: DataFrame,
    tail: DataFrame,
    sample: DataFrame,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = ProfilerConfig::builder()
        .histogram_bins(args.bins)
        .top_k(args.top_k)
        .datetime_granularity(args.granularity.into())
        .preview_rows(args.rows)
        .build()?;

    let df = load_csv(&args.input)?;
    let mut summary = DatasetSummary::new(dataset_name(&args.input), df);

    let coercions = if args.convert.is_empty() {
        Vec::new()
    } else {
        info!("Converting columns to datetime: {:?}", args.convert);
        summary.coerce_to_datetime(args.convert.as_slice())?
    };

    let profile = match DataProfiler::new(config.clone()).profile_dataset(summary.dataframe()) {
        Ok(profile) => profile,
        Err(e) => {
            error!("Profiling failed: {}", e);
            return Err(anyhow!("Profiling failed: {}", e));
        }
    };

    let report = ReportGenerator::build_report(
        &args.input,
        &config,
        summary.overview()?,
        coercions,
        profile,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let generator = ReportGenerator::new(&args.output);
        let report_path =
            generator.write_report_to_file(&report, &report_base_name(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    let previews = Previews {
        head: summary.head(config.preview_rows)?,
        tail: summary.tail(config.preview_rows)?,
        sample: summary.sample(config.preview_rows)?,
    };

    print_human_readable_summary(&report, &previews, config.preview_rows);

    Ok(())
}

// ============================================================================
// Human-readable output
// ============================================================================

/// Print the full exploration: overall information, then one section per
/// column type.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn print_human_readable_summary(report: &ExplorerReport, previews: &Previews, rows: usize) {
    print_overall_information(report, previews, rows);

    print_section_header("NUMERIC COLUMNS");
    if report.numeric.is_empty() {
        println!("No numeric columns found in the dataset.");
    }
    for p in &report.numeric {
        print_column_header(&p.name, "numeric");
        print_statistics(&p.statistics());
        println!("Histogram:");
        print_histogram(&p.histogram);
        println!("Most Frequent Values:");
        print_frequencies(&p.frequent);
    }

    print_section_header("TEXT COLUMNS");
    if report.text.is_empty() {
        println!("No text columns found in the dataset.");
    }
    for p in &report.text {
        print_column_header(&p.name, "text");
        print_statistics(&p.statistics());
        println!("Bar Chart:");
        print_bar_chart(&p.bar_chart);
        println!("Most Frequent Values:");
        print_frequencies(&p.frequent);
    }

    print_section_header("DATETIME COLUMNS");
    if report.datetime.is_empty() {
        println!("No datetime columns found in the dataset.");
    }
    for p in &report.datetime {
        print_column_header(&p.name, "datetime");
        print_statistics(&p.statistics());
        println!("Values over Time:");
        print_bar_chart(&p.bar_chart);
        println!("Most Frequent Values:");
        print_frequencies(&p.frequent);
    }

    println!();
    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}

fn print_overall_information(report: &ExplorerReport, previews: &Previews, rows: usize) {
    let overview = &report.overview;

    print_section_header("OVERALL INFORMATION");
    print_key_value("Name of Dataset", &overview.name);
    print_key_value("Number of Rows", &overview.row_count.to_string());
    print_key_value("Number of Columns", &overview.column_count.to_string());
    print_key_value(
        "Number of Duplicated Rows",
        &overview.duplicate_row_count.to_string(),
    );
    print_key_value(
        "Number of Rows with Missing Values",
        &overview.missing_row_count.to_string(),
    );
    println!();

    println!("List of Columns:");
    let names: Vec<&str> = overview.columns.iter().map(|c| c.name.as_str()).collect();
    println!("  {}", names.join(", "));
    println!();

    println!("Type of Columns:");
    println!("  {:<30} {:<10} {:<20}", "Column", "Type", "Dtype");
    println!("  {}", "-".repeat(60));
    for column in &overview.columns {
        println!(
            "  {:<30} {:<10} {:<20}",
            truncate_str(&column.name, 29),
            column.semantic_type,
            truncate_str(&column.dtype, 19)
        );
    }
    println!();

    println!("Top {} Rows:", rows);
    println!("{}", previews.head);
    println!();
    println!("Bottom {} Rows:", rows);
    println!("{}", previews.tail);
    println!();
    println!("Random Sample of {} Rows:", rows);
    println!("{}", previews.sample);

    if !report.coercions.is_empty() {
        println!();
        println!("Datetime Conversion:");
        for outcome in &report.coercions {
            print_coercion(outcome);
        }
    }

    if !report.skipped_columns.is_empty() {
        println!();
        println!(
            "Columns not profiled (unsupported type): {}",
            report.skipped_columns.join(", ")
        );
    }
}

fn print_coercion(outcome: &CoercionOutcome) {
    if outcome.failed_values > 0 {
        println!(
            "  {}: {} ({} values could not be parsed)",
            outcome.column,
            outcome.message(),
            outcome.failed_values
        );
    } else {
        println!("  {}: {}", outcome.column, outcome.message());
    }
}

fn print_section_header(title: &str) {
    println!();
    println!("{}", "=".repeat(80));
    println!("{}", title);
    println!("{}", "=".repeat(80));
}

fn print_column_header(name: &str, kind: &str) {
    println!();
    println!("Field Name: {} ({})", name, kind);
    println!("{}", "-".repeat(60));
}

fn print_key_value(label: &str, value: &str) {
    println!("  {:<40} {}", label, value);
}

fn print_statistics(stats: &[Statistic]) {
    for stat in stats {
        print_key_value(stat.label, &stat.value.to_string());
    }
    println!();
}

fn print_histogram(buckets: &[HistogramBucket]) {
    if buckets.is_empty() {
        println!("  (no values)");
        return;
    }

    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in buckets {
        println!(
            "  {:<28} {:<width$} {}",
            truncate_str(&bucket.label, 28),
            bar(bucket.count, max),
            bucket.count,
            width = BAR_WIDTH
        );
    }
    println!();
}

fn print_bar_chart(entries: &[FrequencyEntry]) {
    if entries.is_empty() {
        println!("  (no values)");
        return;
    }

    let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
    for entry in entries {
        println!(
            "  {:<28} {:<width$} {}",
            truncate_str(&display_value(&entry.value), 28),
            bar(entry.count, max),
            entry.count,
            width = BAR_WIDTH
        );
    }
    println!();
}

fn print_frequencies(entries: &[FrequencyEntry]) {
    if entries.is_empty() {
        println!("  (no values)");
        return;
    }

    println!("  {:<40} {:>10}", "Value", "Count");
    println!("  {}", "-".repeat(51));
    for entry in entries {
        println!(
            "  {:<40} {:>10}",
            truncate_str(&display_value(&entry.value), 40),
            entry.count
        );
    }
}

/// Make empty and whitespace-only values visible.
fn display_value(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{:?}", value)
    } else {
        value.to_string()
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max);
    "#".repeat(len)
}
