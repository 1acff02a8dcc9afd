//! Column profiling module.
//!
//! This module provides the per-type profilers and the orchestrator that
//! runs them over every column of a dataset:
//! - Numeric statistics and equal-width histograms
//! - Text statistics, character classes and bar aggregation
//! - Datetime statistics, calendar classes and frequency aggregation
//!
//! Every profiler is a pure function over a [`ProfileColumn`] view; the
//! source `DataFrame` is only read.

mod datetime;
mod frequency;
mod numeric;
mod text;

use crate::column::ProfileColumn;
use crate::config::ProfilerConfig;
use crate::error::{Result, ResultExt};
use crate::types::{ColumnProfile, DatasetProfile};
use chrono::{Local, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, info};

pub use datetime::{EPOCH_1900, EPOCH_1970, is_weekend, profile_datetime};
pub use numeric::profile_numeric;
pub use text::{
    is_alphabetic, is_digits, is_lowercase, is_uppercase, is_whitespace_only, profile_text,
};

/// Profile a single column of any supported type.
///
/// `now` is only consulted for datetime columns.
pub fn profile_column(
    column: &ProfileColumn,
    config: &ProfilerConfig,
    now: NaiveDateTime,
) -> ColumnProfile {
    match column {
        ProfileColumn::Numeric(c) => ColumnProfile::Numeric(profile_numeric(c, config)),
        ProfileColumn::Text(c) => ColumnProfile::Text(profile_text(c, config)),
        ProfileColumn::Datetime(c) => ColumnProfile::Datetime(profile_datetime(c, config, now)),
    }
}

/// Dataset profiler running the per-type profilers over a whole table.
pub struct DataProfiler {
    config: ProfilerConfig,
}

impl DataProfiler {
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile every column of `df`, evaluating "future" dates against the
    /// current local wall-clock time.
    pub fn profile_dataset(&self, df: &DataFrame) -> Result<DatasetProfile> {
        self.profile_dataset_at(df, Local::now().naive_local())
    }

    /// Profile every column of `df` against an explicit reference time.
    ///
    /// The configuration is checked first, since it may have been
    /// deserialized rather than built.
    pub fn profile_dataset_at(&self, df: &DataFrame, now: NaiveDateTime) -> Result<DatasetProfile> {
        self.config.validate()?;

        let mut profile = DatasetProfile::default();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let name = series.name().to_string();

            let Some(column) = ProfileColumn::from_series(series)
                .context(format!("Failed to read column '{}'", name))?
            else {
                debug!("Skipping column '{}' with dtype {:?}", name, series.dtype());
                profile.skipped.push(name);
                continue;
            };

            profile.push(profile_column(&column, &self.config, now));
        }

        info!(
            "Profiled {} columns ({} numeric, {} text, {} datetime, {} skipped)",
            profile.profiled_columns(),
            profile.numeric.len(),
            profile.text.len(),
            profile.datetime.len(),
            profile.skipped.len()
        );

        Ok(profile)
    }
}

impl Default for DataProfiler {
    fn default() -> Self {
        Self::new(ProfilerConfig::default())
    }
}
