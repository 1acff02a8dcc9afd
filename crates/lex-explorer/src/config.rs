//! Configuration types for the profiling engine.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic profiler setup.

use serde::{Deserialize, Serialize};

/// Granularity used as the key when aggregating datetime values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DatetimeGranularity {
    /// Truncate each timestamp to its calendar day
    #[default]
    Day,
    /// Use the full timestamp as-is
    Timestamp,
}

/// Configuration for column profiling.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_explorer::config::{DatetimeGranularity, ProfilerConfig};
///
/// let config = ProfilerConfig::builder()
///     .histogram_bins(20)
///     .top_k(5)
///     .datetime_granularity(DatetimeGranularity::Timestamp)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Number of equal-width buckets in a numeric histogram.
    /// Default: 10
    pub histogram_bins: usize,

    /// Number of entries kept in a frequency table.
    /// Default: 10
    pub top_k: usize,

    /// Key used for datetime bar charts and frequency tables.
    /// Default: Day
    pub datetime_granularity: DatetimeGranularity,

    /// Number of rows shown in head/tail/sample previews.
    /// Default: 5
    pub preview_rows: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 10,
            top_k: 10,
            datetime_granularity: DatetimeGranularity::default(),
            preview_rows: 5,
        }
    }
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "histogram_bins".to_string(),
                value: self.histogram_bins,
            });
        }

        if self.top_k == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "top_k".to_string(),
                value: self.top_k,
            });
        }

        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "preview_rows".to_string(),
                value: self.preview_rows,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be at least 1)")]
    InvalidCount { field: String, value: usize },
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    histogram_bins: Option<usize>,
    top_k: Option<usize>,
    datetime_granularity: Option<DatetimeGranularity>,
    preview_rows: Option<usize>,
}

impl ProfilerConfigBuilder {
    /// Set the number of histogram buckets for numeric columns.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set how many of the most frequent values are reported.
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Set the aggregation key for datetime columns.
    pub fn datetime_granularity(mut self, granularity: DatetimeGranularity) -> Self {
        self.datetime_granularity = Some(granularity);
        self
    }

    /// Set the number of rows shown in previews.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let config = ProfilerConfig {
            histogram_bins: self.histogram_bins.unwrap_or(10),
            top_k: self.top_k.unwrap_or(10),
            datetime_granularity: self.datetime_granularity.unwrap_or_default(),
            preview_rows: self.preview_rows.unwrap_or(5),
        };

        config.validate()?;
        Ok(config)
    }
}
