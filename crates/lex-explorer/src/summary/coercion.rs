//! Best-effort text to datetime coercion.
//!
//! Parsing is permissive: ISO 8601 / RFC 3339, RFC 2822, and a list of
//! common date and date-time layouts are tried in order. A value that
//! matches none of them fails on its own without affecting the rest of
//! the column.

use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// "March 3rd, 2024" -> "March 3, 2024"
static ORDINAL_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("Invalid regex: ordinal suffix")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace run"));

/// Layouts carrying a time of day. Month-first wins over day-first for
/// ambiguous slash dates.
const DATETIME_FORMATS: [&str; 14] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %I:%M %p",
];

/// Date-only layouts; parsed values land on midnight.
const DATE_FORMATS: [&str; 16] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%b-%Y",
];

/// Parse a single text value as a datetime.
///
/// Returns `None` for blank input and for anything no known layout accepts.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }

    let normalized = WHITESPACE_RUN.replace_all(trimmed, " ");
    let normalized = ORDINAL_SUFFIX.replace_all(&normalized, "$1");

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Outcome of reparsing one text series.
#[derive(Debug)]
pub(crate) struct CoercedSeries {
    /// The datetime series, present only when every value parsed.
    pub series: Option<Series>,
    pub failed_values: usize,
}

/// Reparse a string series as millisecond datetimes.
///
/// Blank cells become missing. Any non-blank cell that fails to parse makes
/// the whole column unconverted; the caller keeps the original text.
pub(crate) fn coerce_text_series(series: &Series) -> Result<CoercedSeries> {
    let strings = series.cast(&DataType::String)?;
    let mut millis: Vec<Option<i64>> = Vec::with_capacity(strings.len());
    let mut failed_values = 0;

    for opt_val in strings.str()?.into_iter() {
        match opt_val {
            Some(val) if !val.trim().is_empty() => match parse_datetime(val) {
                Some(ts) => millis.push(Some(ts.and_utc().timestamp_millis())),
                None => {
                    failed_values += 1;
                    millis.push(None);
                }
            },
            _ => millis.push(None),
        }
    }

    if failed_values > 0 {
        return Ok(CoercedSeries {
            series: None,
            failed_values,
        });
    }

    let converted = Series::new(series.name().clone(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

    Ok(CoercedSeries {
        series: Some(converted),
        failed_values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parse_iso_formats() {
        assert_eq!(parse_datetime("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(
            parse_datetime("2024-01-15 08:30:00"),
            Some(ymd_hms(2024, 1, 15, 8, 30, 0))
        );
        assert_eq!(
            parse_datetime("2024-01-15T08:30:00"),
            Some(ymd_hms(2024, 1, 15, 8, 30, 0))
        );
        assert_eq!(
            parse_datetime("2024-01-15T08:30:00Z"),
            Some(ymd_hms(2024, 1, 15, 8, 30, 0))
        );
    }

    #[test]
    fn test_parse_rfc3339_offset_is_normalized_to_utc() {
        assert_eq!(
            parse_datetime("2024-01-15T10:30:00+02:00"),
            Some(ymd_hms(2024, 1, 15, 8, 30, 0))
        );
    }

    #[test]
    fn test_parse_slash_dates_month_first() {
        assert_eq!(parse_datetime("03/04/2024"), Some(ymd(2024, 3, 4)));
        // impossible as month-first, falls back to day-first
        assert_eq!(parse_datetime("25/12/2024"), Some(ymd(2024, 12, 25)));
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse_datetime("March 3, 2024"), Some(ymd(2024, 3, 3)));
        assert_eq!(parse_datetime("March 3rd, 2024"), Some(ymd(2024, 3, 3)));
        assert_eq!(parse_datetime("3 Mar 2024"), Some(ymd(2024, 3, 3)));
        assert_eq!(parse_datetime("03-Mar-2024"), Some(ymd(2024, 3, 3)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_datetime("not a date"), None);
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("   "), None);
        assert_eq!(parse_datetime("2024-13-45"), None);
    }

    #[test]
    fn test_coerce_all_valid() {
        let series = Series::new(
            "d".into(),
            &[Some("2024-01-15"), None, Some(" "), Some("1970-01-01")],
        );
        let coerced = coerce_text_series(&series).unwrap();

        assert_eq!(coerced.failed_values, 0);
        let converted = coerced.series.unwrap();
        assert!(matches!(converted.dtype(), DataType::Datetime(_, _)));
        assert_eq!(converted.null_count(), 2);
        assert_eq!(converted.len(), 4);
    }

    #[test]
    fn test_coerce_with_failures_is_not_converted() {
        let series = Series::new("d".into(), &["2024-01-15", "tomorrow", "nope"]);
        let coerced = coerce_text_series(&series).unwrap();

        assert!(coerced.series.is_none());
        assert_eq!(coerced.failed_values, 2);
    }
}
