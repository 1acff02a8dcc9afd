//! Exploratory Data Analysis Library
//!
//! A column profiling library for tabular data built with Rust and Polars.
//!
//! # Overview
//!
//! Given a loaded table, this library provides:
//!
//! - **Dataset Summary**: row/column counts, duplicate and incomplete rows,
//!   per-column type classification, head/tail/random previews and
//!   text-to-datetime coercion
//! - **Numeric Profiling**: counts, moments, quantiles and equal-width histograms
//! - **Text Profiling**: character-class counts, mode and value frequencies
//! - **Datetime Profiling**: calendar classes, placeholder epochs, dates in
//!   the future and per-day frequencies
//! - **Reporting**: a single serializable report of all of the above
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_explorer::{DataProfiler, DatasetSummary, ProfilerConfig, load_csv};
//!
//! let df = load_csv("data/sales.csv")?;
//! let mut summary = DatasetSummary::new("sales.csv", df);
//!
//! println!("rows: {}", summary.row_count());
//! println!("duplicates: {}", summary.duplicate_row_count()?);
//! println!("{}", summary.head(5)?);
//!
//! // Optional: turn text columns holding dates into datetime columns
//! let outcomes = summary.coerce_to_datetime(&["order_date"])?;
//!
//! let profile = DataProfiler::new(ProfilerConfig::default())
//!     .profile_dataset(summary.dataframe())?;
//!
//! for numeric in &profile.numeric {
//!     for stat in numeric.statistics() {
//!         println!("{}: {}", stat.label, stat.value);
//!     }
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`ProfilerConfig`] to customize profiling:
//!
//! ```rust,ignore
//! use lex_explorer::config::*;
//!
//! let config = ProfilerConfig::builder()
//!     .histogram_bins(20)                  // Histogram resolution
//!     .top_k(5)                            // Frequency table length
//!     .datetime_granularity(DatetimeGranularity::Day)
//!     .preview_rows(10)                    // head/tail/sample size
//!     .build()?;
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod summary;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use column::{DatetimeColumn, NumericColumn, ProfileColumn, TextColumn};
pub use config::{
    ConfigValidationError, DatetimeGranularity, ProfilerConfig, ProfilerConfigBuilder,
};
pub use error::{ExplorerError, Result as ExplorerResult, ResultExt};
pub use loader::{dataset_name, load_csv, load_csv_from_str};
pub use profiler::{DataProfiler, profile_column, profile_datetime, profile_numeric, profile_text};
pub use reporting::{ExplorerReport, ReportGenerator, report_base_name};
pub use summary::{DatasetSummary, parse_datetime};
pub use types::{
    CoercionOutcome, ColumnProfile, ColumnTypeEntry, DatasetOverview, DatasetProfile,
    DatetimeProfile, FrequencyEntry, HistogramBucket, NumericProfile, SemanticType, StatValue,
    Statistic, TextProfile,
};
pub use utils::{is_datetime_dtype, is_numeric_dtype, is_text_dtype, semantic_type_of};
