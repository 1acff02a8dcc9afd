//! Integration tests for the exploratory data analysis engine.
//!
//! These tests load CSV fixtures from disk and check the summary, coercion,
//! profiling and reporting stages end to end.

use chrono::{NaiveDate, NaiveDateTime};
use lex_explorer::{
    DataProfiler, DatasetSummary, ExplorerError, ProfilerConfig, ReportGenerator, SemanticType,
    StatValue, dataset_name, load_csv, load_csv_from_str,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_summary(filename: &str) -> DatasetSummary {
    let path = fixtures_path().join(filename);
    let df = load_csv(&path).expect("Failed to read CSV file");
    DatasetSummary::new(dataset_name(&path), df)
}

fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// ============================================================================
// Dataset Summary
// ============================================================================

#[test]
fn test_mixed_overview() {
    let summary = load_summary("mixed.csv");
    let overview = summary.overview().unwrap();

    assert_eq!(overview.name, "mixed.csv");
    assert_eq!(overview.row_count, 5);
    assert_eq!(overview.column_count, 6);
    assert_eq!(overview.duplicate_row_count, 0);
    assert_eq!(overview.missing_row_count, 1);

    let types: Vec<(&str, SemanticType)> = overview
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.semantic_type))
        .collect();
    assert_eq!(
        types,
        vec![
            ("id", SemanticType::Numeric),
            ("price", SemanticType::Numeric),
            ("name", SemanticType::Text),
            ("order_date", SemanticType::Text),
            ("shipped", SemanticType::Text),
            ("active", SemanticType::Other),
        ]
    );
}

#[test]
fn test_duplicate_rows_fixture() {
    let summary = load_summary("duplicates.csv");
    assert_eq!(summary.duplicate_row_count().unwrap(), 1);
}

#[test]
fn test_previews() {
    let summary = load_summary("mixed.csv");

    assert_eq!(summary.head(2).unwrap().height(), 2);
    assert_eq!(summary.tail(10).unwrap().height(), 5);
    assert_eq!(summary.sample(3).unwrap().height(), 3);

    let err = summary.head(0).unwrap_err();
    assert!(matches!(
        err,
        ExplorerError::InvalidRowCount {
            requested: 0,
            available: 5
        }
    ));
}

#[test]
fn test_header_only_file() {
    let df = load_csv_from_str("a,b\n").unwrap();
    let summary = DatasetSummary::new("empty.csv", df);

    assert_eq!(summary.row_count(), 0);
    assert_eq!(summary.duplicate_row_count().unwrap(), 0);
    assert_eq!(summary.missing_row_count().unwrap(), 0);
    assert_eq!(summary.head(5).unwrap().height(), 0);
    assert_eq!(summary.sample(5).unwrap().height(), 0);
}

// ============================================================================
// Coercion
// ============================================================================

#[test]
fn test_coercion_outcomes() {
    let mut summary = load_summary("mixed.csv");

    let outcomes = summary
        .coerce_to_datetime(&["order_date", "shipped", "price"])
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].converted);
    assert!(!outcomes[1].converted);
    assert_eq!(outcomes[1].failed_values, 1);
    assert!(!outcomes[2].converted);
    assert_eq!(
        outcomes[1].message(),
        "Column is not under Datetime format or mixed with other data types."
    );
    assert_eq!(
        outcomes[0].message(),
        "The column has successfully converted to Datetime format."
    );

    assert_eq!(
        summary.text_columns(),
        vec!["name".to_string(), "shipped".to_string()]
    );
}

#[test]
fn test_coercion_unknown_column() {
    let mut summary = load_summary("mixed.csv");
    let err = summary.coerce_to_datetime(&["missing"]).unwrap_err();

    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
}

// ============================================================================
// Profiling
// ============================================================================

#[test]
fn test_full_profile_mixed() {
    let mut summary = load_summary("mixed.csv");
    summary.coerce_to_datetime(&["order_date"]).unwrap();

    let profile = DataProfiler::default()
        .profile_dataset_at(summary.dataframe(), reference_time())
        .unwrap();

    assert_eq!(profile.numeric.len(), 2);
    assert_eq!(profile.text.len(), 2);
    assert_eq!(profile.datetime.len(), 1);
    assert_eq!(profile.skipped, vec!["active".to_string()]);

    let price = profile.numeric.iter().find(|p| p.name == "price").unwrap();
    assert_eq!(price.missing, 1);
    assert_eq!(price.zeros, 1);
    assert_eq!(price.negatives, 1);
    assert_eq!(price.unique, 4);
    assert!((price.mean.unwrap() - 3.75).abs() < 1e-12);
    assert_eq!(price.min, Some(-2.5));
    assert_eq!(price.max, Some(10.5));
    let histogram_total: usize = price.histogram.iter().map(|b| b.count).sum();
    assert_eq!(histogram_total, 4);

    let name = profile.text.iter().find(|p| p.name == "name").unwrap();
    assert_eq!(name.unique, 4);
    assert_eq!(name.mode.as_deref(), Some("apple"));
    assert_eq!(name.lowercase, 2);
    assert_eq!(name.uppercase, 1);
    assert_eq!(name.digit, 1);
    assert_eq!(name.alphabet, 4);

    let order_date = &profile.datetime[0];
    assert_eq!(order_date.name, "order_date");
    assert_eq!(order_date.unique, 4);
    // 2024-01-20 and 2024-02-03 are Saturdays
    assert_eq!(order_date.weekend, 2);
    assert_eq!(order_date.weekday, 3);
    assert_eq!(order_date.future, 0);
    assert_eq!(order_date.frequent[0].value, "2024-01-16");
    assert_eq!(order_date.frequent[0].count, 2);
}

#[test]
fn test_placeholder_dates() {
    let mut summary = load_summary("placeholders.csv");
    let outcomes = summary.coerce_to_datetime(&["happened_at"]).unwrap();
    assert!(outcomes[0].converted);

    let profile = DataProfiler::default()
        .profile_dataset_at(summary.dataframe(), reference_time())
        .unwrap();
    let dates = &profile.datetime[0];

    assert_eq!(dates.epoch_1900, 1);
    assert_eq!(dates.epoch_1970, 1);
    assert_eq!(dates.future, 3);
    assert_eq!(dates.missing, 0);

    let stats = dates.statistics();
    let labels: Vec<&str> = stats.iter().map(|s| s.label).collect();
    assert_eq!(
        labels,
        vec![
            "Number of Unique Values",
            "Number of Rows with Missing Values",
            "Number of Weekend Dates",
            "Number of Weekday Dates",
            "Number of Dates in Future",
            "Number of Rows with 1900-01-01",
            "Number of Rows with 1970-01-01",
            "Minimum Value",
            "Maximum Value",
        ]
    );
    assert_eq!(stats[5].value, StatValue::Count(1));
}

#[test]
fn test_custom_config() {
    let summary = load_summary("mixed.csv");
    let config = ProfilerConfig::builder()
        .histogram_bins(2)
        .top_k(1)
        .build()
        .unwrap();

    let profile = DataProfiler::new(config)
        .profile_dataset_at(summary.dataframe(), reference_time())
        .unwrap();

    for numeric in &profile.numeric {
        assert!(numeric.histogram.len() <= 2);
        assert!(numeric.frequent.len() <= 1);
    }
    for text in &profile.text {
        assert!(text.frequent.len() <= 1);
    }
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn test_report_end_to_end() {
    let mut summary = load_summary("mixed.csv");
    let config = ProfilerConfig::default();
    let coercions = summary.coerce_to_datetime(&["order_date"]).unwrap();
    let profile = DataProfiler::new(config.clone())
        .profile_dataset_at(summary.dataframe(), reference_time())
        .unwrap();

    let report = ReportGenerator::build_report(
        "tests/fixtures/mixed.csv",
        &config,
        summary.overview().unwrap(),
        coercions,
        profile,
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["overview"]["row_count"], 5);
    assert_eq!(json["coercions"][0]["converted"], true);
    assert_eq!(json["datetime"][0]["name"], "order_date");

    let dir = std::env::temp_dir().join(format!("lex-explorer-it-{}", std::process::id()));
    let path = ReportGenerator::new(&dir)
        .write_report_to_file(&report, "mixed")
        .unwrap();
    assert!(path.ends_with("mixed_report.json"));
    assert!(path.exists());

    std::fs::remove_dir_all(&dir).ok();
}
