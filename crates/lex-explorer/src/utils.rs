//! Shared utilities for the profiling engine.
//!
//! This module contains dtype classification and small formatting helpers
//! used across the summary, profiler and reporting modules.

use crate::types::SemanticType;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a float type (the only dtypes that can hold NaN).
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType carries a calendar date.
///
/// `Time` is excluded: a time of day has no day-of-week.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Datetime(_, _) | DataType::Date)
}

/// Check if a DataType holds text.
#[inline]
pub fn is_text_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

/// Get the semantic type of a DataType.
pub fn semantic_type_of(dtype: &DataType) -> SemanticType {
    if is_numeric_dtype(dtype) {
        SemanticType::Numeric
    } else if is_datetime_dtype(dtype) {
        SemanticType::Datetime
    } else if is_text_dtype(dtype) {
        SemanticType::Text
    } else {
        SemanticType::Other
    }
}

/// Get the semantic type of a Series.
pub fn series_semantic_type(series: &Series) -> SemanticType {
    semantic_type_of(series.dtype())
}

// =============================================================================
// Naming and Formatting Utilities
// =============================================================================

/// Replace every whitespace character in a column name with `_`.
///
/// # Example
///
/// ```rust,ignore
/// use lex_explorer::utils::normalize_column_name;
///
/// assert_eq!(normalize_column_name("order date"), "order_date");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Format a bucket boundary for display, trimming float noise.
///
/// Values keep six significant digits. Very small and very large
/// magnitudes switch to exponent notation so they never collapse to "0"
/// or expand to hundreds of digits.
pub fn format_bound(value: f64) -> String {
    if value == 0.0 {
        // also covers -0.0
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded: f64 = format!("{:.5e}", value).parse().unwrap_or(value);
    let magnitude = rounded.abs();
    if (1e-4..1e15).contains(&magnitude) {
        format!("{}", rounded)
    } else {
        format!("{:e}", rounded)
    }
}

/// Truncate a string to max length with ellipsis
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_is_datetime_dtype() {
        assert!(is_datetime_dtype(&DataType::Date));
        assert!(is_datetime_dtype(&DataType::Datetime(
            TimeUnit::Milliseconds,
            None
        )));
        assert!(!is_datetime_dtype(&DataType::Time));
        assert!(!is_datetime_dtype(&DataType::String));
    }

    #[test]
    fn test_semantic_type_of() {
        assert_eq!(semantic_type_of(&DataType::Int64), SemanticType::Numeric);
        assert_eq!(semantic_type_of(&DataType::Float32), SemanticType::Numeric);
        assert_eq!(semantic_type_of(&DataType::Date), SemanticType::Datetime);
        assert_eq!(semantic_type_of(&DataType::String), SemanticType::Text);
        assert_eq!(semantic_type_of(&DataType::Boolean), SemanticType::Other);
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("order date"), "order_date");
        assert_eq!(normalize_column_name("a b\tc"), "a_b_c");
        assert_eq!(normalize_column_name("plain"), "plain");
    }

    #[test]
    fn test_format_bound() {
        assert_eq!(format_bound(0.88), "0.88");
        assert_eq!(format_bound(0.1 + 0.2), "0.3");
        assert_eq!(format_bound(-0.0), "0");
        assert_eq!(format_bound(4.0), "4");
    }

    #[test]
    fn test_format_bound_relative_precision() {
        assert_eq!(format_bound(1e-9), "1e-9");
        assert_eq!(format_bound(1.9e-9), "1.9e-9");
        assert_eq!(format_bound(-2.5e-7), "-2.5e-7");
        assert_eq!(format_bound(1e308), "1e308");
        assert_eq!(format_bound(-1.7976931348623157e308), "-1.79769e308");
        assert_eq!(format_bound(1234567.891), "1234570");
        assert_eq!(format_bound(f64::INFINITY), "inf");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a_very_long_column_name", 10), "a_very_...");
    }
}
