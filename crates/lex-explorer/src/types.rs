use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a column, derived from its native dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Numeric,
    Text,
    Datetime,
    Other,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Datetime => "datetime",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scalar statistic value.
///
/// `Undefined` is used for statistics that have no meaning for the column
/// (e.g. the mean of an all-missing column) and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(usize),
    Number(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    Undefined,
}

impl From<Option<f64>> for StatValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::Number)
    }
}

impl From<Option<NaiveDateTime>> for StatValue {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Self::Undefined, Self::Timestamp)
    }
}

impl From<Option<String>> for StatValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Undefined, Self::Text)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Number(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
            Self::Timestamp(ts) => write!(f, "{}", ts),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// One row of a key-value statistics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistic {
    pub key: &'static str,
    pub label: &'static str,
    pub value: StatValue,
}

impl Statistic {
    pub(crate) fn new(key: &'static str, label: &'static str, value: impl Into<StatValue>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
        }
    }

    pub(crate) fn count(key: &'static str, label: &'static str, n: usize) -> Self {
        Self::new(key, label, StatValue::Count(n))
    }
}

/// A distinct value and the number of cells holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// One equal-width histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    /// Whether `upper` belongs to the bucket (true only for the last one).
    pub upper_inclusive: bool,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericProfile {
    pub name: String,
    pub row_count: usize,
    pub unique: usize,
    pub missing: usize,
    pub zeros: usize,
    pub negatives: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub histogram: Vec<HistogramBucket>,
    pub frequent: Vec<FrequencyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextProfile {
    pub name: String,
    pub row_count: usize,
    pub unique: usize,
    pub missing: usize,
    pub empty: usize,
    pub whitespace: usize,
    pub lowercase: usize,
    pub uppercase: usize,
    pub alphabet: usize,
    pub digit: usize,
    pub mode: Option<String>,
    pub bar_chart: Vec<FrequencyEntry>,
    pub frequent: Vec<FrequencyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatetimeProfile {
    pub name: String,
    pub row_count: usize,
    pub unique: usize,
    pub missing: usize,
    pub weekend: usize,
    pub weekday: usize,
    pub future: usize,
    pub epoch_1900: usize,
    pub epoch_1970: usize,
    pub min: Option<NaiveDateTime>,
    pub max: Option<NaiveDateTime>,
    /// Instant `future` was evaluated against.
    pub reference_time: NaiveDateTime,
    pub bar_chart: Vec<FrequencyEntry>,
    pub frequent: Vec<FrequencyEntry>,
}

/// Profile of a single column, tagged by semantic type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnProfile {
    Numeric(NumericProfile),
    Text(TextProfile),
    Datetime(DatetimeProfile),
}

impl ColumnProfile {
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric(p) => &p.name,
            Self::Text(p) => &p.name,
            Self::Datetime(p) => &p.name,
        }
    }

    pub fn semantic_type(&self) -> SemanticType {
        match self {
            Self::Numeric(_) => SemanticType::Numeric,
            Self::Text(_) => SemanticType::Text,
            Self::Datetime(_) => SemanticType::Datetime,
        }
    }

    pub fn statistics(&self) -> Vec<Statistic> {
        match self {
            Self::Numeric(p) => p.statistics(),
            Self::Text(p) => p.statistics(),
            Self::Datetime(p) => p.statistics(),
        }
    }

    pub fn frequent(&self) -> &[FrequencyEntry] {
        match self {
            Self::Numeric(p) => &p.frequent,
            Self::Text(p) => &p.frequent,
            Self::Datetime(p) => &p.frequent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeEntry {
    pub name: String,
    pub semantic_type: SemanticType,
    /// Native polars dtype, e.g. `Int64` or `String`.
    pub dtype: String,
}

/// Whole-table statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub duplicate_row_count: usize,
    pub missing_row_count: usize,
    pub columns: Vec<ColumnTypeEntry>,
}

/// Result of attempting to reparse one text column as datetimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionOutcome {
    pub column: String,
    pub converted: bool,
    /// Number of non-missing cells the parser rejected.
    pub failed_values: usize,
}

impl CoercionOutcome {
    pub fn message(&self) -> &'static str {
        if self.converted {
            "The column has successfully converted to Datetime format."
        } else {
            "Column is not under Datetime format or mixed with other data types."
        }
    }
}

/// Per-column profiles partitioned by semantic type, in table order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub numeric: Vec<NumericProfile>,
    pub text: Vec<TextProfile>,
    pub datetime: Vec<DatetimeProfile>,
    /// Columns of type "other" that were not profiled.
    pub skipped: Vec<String>,
}

impl DatasetProfile {
    pub fn push(&mut self, profile: ColumnProfile) {
        match profile {
            ColumnProfile::Numeric(p) => self.numeric.push(p),
            ColumnProfile::Text(p) => self.text.push(p),
            ColumnProfile::Datetime(p) => self.datetime.push(p),
        }
    }

    pub fn profiled_columns(&self) -> usize {
        self.numeric.len() + self.text.len() + self.datetime.len()
    }
}
