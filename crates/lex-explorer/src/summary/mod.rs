//! Whole-table statistics and previews.
//!
//! [`DatasetSummary`] owns the loaded table and answers the questions asked
//! before any per-column profiling: how big is it, how many rows repeat or
//! have holes, what type is each column, and what do the first, last and a
//! few random rows look like. It is also the only place the table is
//! mutated, when text columns are coerced to datetimes.

mod coercion;

pub use coercion::parse_datetime;

use crate::error::{ExplorerError, Result, ResultExt};
use crate::types::{CoercionOutcome, ColumnTypeEntry, DatasetOverview, SemanticType};
use crate::utils::{is_float_dtype, series_semantic_type};
use polars::prelude::*;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

/// A named table plus the whole-table queries over it.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    name: String,
    df: DataFrame,
}

impl DatasetSummary {
    pub fn new(name: impl Into<String>, df: DataFrame) -> Self {
        Self {
            name: name.into(),
            df,
        }
    }

    /// Display name of the table, usually the source file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.df.width()
    }

    /// Rows identical to an earlier row across every column.
    pub fn duplicate_row_count(&self) -> Result<usize> {
        if self.df.height() == 0 || self.df.width() == 0 {
            return Ok(0);
        }

        let unique = self
            .df
            .unique::<&str, &str>(None, UniqueKeepStrategy::First, None)
            .context("Failed to deduplicate rows")?;

        Ok(self.df.height() - unique.height())
    }

    /// Rows with at least one null cell, or a NaN in a float column.
    pub fn missing_row_count(&self) -> Result<usize> {
        let mut flags = vec![false; self.df.height()];

        for col in self.df.get_columns() {
            let series = col.as_materialized_series();

            let nulls = series.is_null();
            for (flag, is_null) in flags.iter_mut().zip(&nulls) {
                if is_null == Some(true) {
                    *flag = true;
                }
            }

            if is_float_dtype(series.dtype()) {
                let floats = series.cast(&DataType::Float64)?;
                for (flag, value) in flags.iter_mut().zip(floats.f64()?.into_iter()) {
                    if value.is_some_and(f64::is_nan) {
                        *flag = true;
                    }
                }
            }
        }

        Ok(flags.into_iter().filter(|&f| f).count())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect()
    }

    /// Ordered name to semantic type mapping, read from native dtypes only.
    pub fn column_types(&self) -> Vec<ColumnTypeEntry> {
        self.df
            .get_columns()
            .iter()
            .map(|col| {
                let series = col.as_materialized_series();
                ColumnTypeEntry {
                    name: series.name().to_string(),
                    semantic_type: series_semantic_type(series),
                    dtype: format!("{:?}", series.dtype()),
                }
            })
            .collect()
    }

    /// Names of the text columns, i.e. the candidates for datetime coercion.
    pub fn text_columns(&self) -> Vec<String> {
        self.column_types()
            .into_iter()
            .filter(|c| c.semantic_type == SemanticType::Text)
            .map(|c| c.name)
            .collect()
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Result<DataFrame> {
        let n = self.resolve_row_count(n)?;
        Ok(self.df.head(Some(n)))
    }

    /// Last `n` rows.
    pub fn tail(&self, n: usize) -> Result<DataFrame> {
        let n = self.resolve_row_count(n)?;
        Ok(self.df.tail(Some(n)))
    }

    /// `n` rows drawn uniformly without replacement, kept in table order.
    pub fn sample(&self, n: usize) -> Result<DataFrame> {
        let n = self.resolve_row_count(n)?;
        let height = self.df.height();
        if n == height {
            return Ok(self.df.clone());
        }

        let indices: Vec<usize> = (0..height).collect();
        let mut mask = vec![false; height];
        for &idx in indices.choose_multiple(&mut rand::thread_rng(), n) {
            mask[idx] = true;
        }

        let mask = Series::new("sample".into(), mask);
        Ok(self.df.filter(mask.bool()?)?)
    }

    /// `n == 0` is rejected; anything above the row count is clamped.
    fn resolve_row_count(&self, n: usize) -> Result<usize> {
        let available = self.df.height();
        if n == 0 {
            return Err(ExplorerError::InvalidRowCount {
                requested: n,
                available,
            });
        }
        Ok(n.min(available))
    }

    /// Reparse the named text columns as datetimes.
    ///
    /// A column is replaced in the table only when every non-blank value
    /// parses. Columns that already hold datetimes are reported as converted
    /// and left alone; other non-text columns are reported as not converted.
    /// Every name is checked before anything changes, so an unknown name
    /// leaves the table untouched.
    pub fn coerce_to_datetime<S: AsRef<str>>(
        &mut self,
        columns: &[S],
    ) -> Result<Vec<CoercionOutcome>> {
        for name in columns {
            let name = name.as_ref();
            if self.df.column(name).is_err() {
                return Err(ExplorerError::ColumnNotFound(name.to_string()));
            }
        }

        let mut outcomes = Vec::with_capacity(columns.len());

        for name in columns {
            let name = name.as_ref();
            let series = self.df.column(name)?.as_materialized_series().clone();

            let outcome = match series_semantic_type(&series) {
                SemanticType::Datetime => {
                    debug!("Column '{}' already holds datetimes", name);
                    CoercionOutcome {
                        column: name.to_string(),
                        converted: true,
                        failed_values: 0,
                    }
                }
                SemanticType::Text => {
                    let coerced = coercion::coerce_text_series(&series)
                        .context(format!("Failed to coerce column '{}'", name))?;
                    let converted = match coerced.series {
                        Some(parsed) => {
                            self.df.replace(name, parsed)?;
                            info!("Converted column '{}' to datetime", name);
                            true
                        }
                        None => {
                            warn!(
                                "Column '{}' kept as text: {} values could not be parsed",
                                name, coerced.failed_values
                            );
                            false
                        }
                    };
                    CoercionOutcome {
                        column: name.to_string(),
                        converted,
                        failed_values: coerced.failed_values,
                    }
                }
                other => {
                    warn!("Column '{}' is {} and cannot be coerced", name, other);
                    CoercionOutcome {
                        column: name.to_string(),
                        converted: false,
                        failed_values: 0,
                    }
                }
            };

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Serializable snapshot of the whole-table statistics.
    pub fn overview(&self) -> Result<DatasetOverview> {
        Ok(DatasetOverview {
            name: self.name.clone(),
            row_count: self.row_count(),
            column_count: self.column_count(),
            duplicate_row_count: self.duplicate_row_count()?,
            missing_row_count: self.missing_row_count()?,
            columns: self.column_types(),
        })
    }
}
