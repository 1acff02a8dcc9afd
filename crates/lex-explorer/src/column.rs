//! Typed column views extracted from a polars `Series`.
//!
//! Profilers never work on polars data directly. A column is materialized
//! once into one of the [`ProfileColumn`] variants, with missing cells as
//! `None`, and every statistic is computed over that read-only view.

use crate::error::{ExplorerError, Result};
use crate::types::SemanticType;
use crate::utils::series_semantic_type;
use chrono::{DateTime, NaiveDateTime, Utc};
use polars::prelude::*;

/// Numeric column; integers are widened to `f64` and NaN is treated as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
    pub name: String,
    pub values: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatetimeColumn {
    pub name: String,
    pub values: Vec<Option<NaiveDateTime>>,
}

/// A column tagged with the semantic type it will be profiled as.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileColumn {
    Numeric(NumericColumn),
    Text(TextColumn),
    Datetime(DatetimeColumn),
}

impl NumericColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn from_series(series: &Series) -> Result<Self> {
        ensure_type(series, SemanticType::Numeric)?;
        let floats = series.cast(&DataType::Float64)?;
        let values = floats.f64()?.into_iter().collect();
        Ok(Self::new(series.name().to_string(), values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the non-missing values in column order.
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }
}

impl TextColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn from_series(series: &Series) -> Result<Self> {
        ensure_type(series, SemanticType::Text)?;
        let strings = series.cast(&DataType::String)?;
        let values = strings
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(Self::new(series.name().to_string(), values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn present(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().flatten().map(String::as_str)
    }
}

impl DatetimeColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build from a `Date` or `Datetime` series. Timezone-aware values are
    /// read as their UTC wall-clock time.
    pub fn from_series(series: &Series) -> Result<Self> {
        ensure_type(series, SemanticType::Datetime)?;
        let millis = series
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .cast(&DataType::Int64)?;
        let values = millis
            .i64()?
            .into_iter()
            .map(|v| {
                v.and_then(DateTime::<Utc>::from_timestamp_millis)
                    .map(|dt| dt.naive_utc())
            })
            .collect();
        Ok(Self::new(series.name().to_string(), values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn present(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.values.iter().flatten().copied()
    }
}

impl ProfileColumn {
    /// Classify a series by its dtype and extract it.
    ///
    /// Returns `Ok(None)` for columns of type "other" (booleans, lists, ...),
    /// which take part in whole-table statistics but are never profiled.
    pub fn from_series(series: &Series) -> Result<Option<Self>> {
        let column = match series_semantic_type(series) {
            SemanticType::Numeric => Some(Self::Numeric(NumericColumn::from_series(series)?)),
            SemanticType::Text => Some(Self::Text(TextColumn::from_series(series)?)),
            SemanticType::Datetime => Some(Self::Datetime(DatetimeColumn::from_series(series)?)),
            SemanticType::Other => None,
        };
        Ok(column)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Numeric(c) => &c.name,
            Self::Text(c) => &c.name,
            Self::Datetime(c) => &c.name,
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Self::Numeric(_) => SemanticType::Numeric,
            Self::Text(_) => SemanticType::Text,
            Self::Datetime(_) => SemanticType::Datetime,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(c) => c.len(),
            Self::Text(c) => c.len(),
            Self::Datetime(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn ensure_type(series: &Series, expected: SemanticType) -> Result<()> {
    if series_semantic_type(series) == expected {
        Ok(())
    } else {
        Err(ExplorerError::UnsupportedColumnType {
            column: series.name().to_string(),
            expected: expected.to_string(),
            dtype: format!("{:?}", series.dtype()),
        })
    }
}
