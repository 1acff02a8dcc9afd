//! Statistics, calendar classification and frequency aggregation for
//! datetime columns.

use super::frequency::FrequencyCounter;
use crate::column::DatetimeColumn;
use crate::config::{DatetimeGranularity, ProfilerConfig};
use crate::types::{DatetimeProfile, Statistic};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use tracing::debug;

/// 1900-01-01 00:00:00, a common "unknown date" placeholder.
pub static EPOCH_1900: Lazy<NaiveDateTime> = Lazy::new(|| midnight(1900, 1, 1));

/// 1970-01-01 00:00:00, the Unix epoch.
pub static EPOCH_1970: Lazy<NaiveDateTime> = Lazy::new(|| midnight(1970, 1, 1));

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// Profile one datetime column.
///
/// `now` is the reference instant for the `future` count.
pub fn profile_datetime(
    column: &DatetimeColumn,
    config: &ProfilerConfig,
    now: NaiveDateTime,
) -> DatetimeProfile {
    let distinct: FrequencyCounter<NaiveDateTime> = column.present().collect();
    let buckets: FrequencyCounter<NaiveDateTime> = column
        .present()
        .map(|ts| truncate(ts, config.datetime_granularity))
        .collect();
    let missing = column.values.iter().filter(|v| v.is_none()).count();

    let mut weekend = 0;
    let mut weekday = 0;
    let mut future = 0;
    let mut epoch_1900 = 0;
    let mut epoch_1970 = 0;

    for ts in column.present() {
        if is_weekend(ts) {
            weekend += 1;
        } else {
            weekday += 1;
        }
        if ts > now {
            future += 1;
        }
        if ts == *EPOCH_1900 {
            epoch_1900 += 1;
        }
        if ts == *EPOCH_1970 {
            epoch_1970 += 1;
        }
    }

    let label = |ts: &NaiveDateTime| format_key(*ts, config.datetime_granularity);

    debug!(
        "Profiled datetime column '{}': {} distinct, {} missing, {} in future",
        column.name,
        distinct.distinct(),
        missing,
        future
    );

    DatetimeProfile {
        name: column.name.clone(),
        row_count: column.len(),
        unique: distinct.distinct(),
        missing,
        weekend,
        weekday,
        future,
        epoch_1900,
        epoch_1970,
        min: column.present().min(),
        max: column.present().max(),
        reference_time: now,
        bar_chart: buckets.entries(label),
        frequent: buckets.top_k(config.top_k, label),
    }
}

/// Saturday or Sunday.
pub fn is_weekend(ts: NaiveDateTime) -> bool {
    matches!(ts.weekday(), Weekday::Sat | Weekday::Sun)
}

fn truncate(ts: NaiveDateTime, granularity: DatetimeGranularity) -> NaiveDateTime {
    match granularity {
        DatetimeGranularity::Day => ts.date().and_time(NaiveTime::MIN),
        DatetimeGranularity::Timestamp => ts,
    }
}

fn format_key(ts: NaiveDateTime, granularity: DatetimeGranularity) -> String {
    match granularity {
        DatetimeGranularity::Day => ts.date().to_string(),
        DatetimeGranularity::Timestamp => ts.to_string(),
    }
}

impl DatetimeProfile {
    /// Number of non-missing cells.
    pub fn non_missing(&self) -> usize {
        self.row_count - self.missing
    }

    pub fn statistics(&self) -> Vec<Statistic> {
        vec![
            Statistic::count("unique", "Number of Unique Values", self.unique),
            Statistic::count(
                "missing",
                "Number of Rows with Missing Values",
                self.missing,
            ),
            Statistic::count("weekend", "Number of Weekend Dates", self.weekend),
            Statistic::count("weekday", "Number of Weekday Dates", self.weekday),
            Statistic::count("future", "Number of Dates in Future", self.future),
            Statistic::count(
                "epoch1900",
                "Number of Rows with 1900-01-01",
                self.epoch_1900,
            ),
            Statistic::count(
                "epoch1970",
                "Number of Rows with 1970-01-01",
                self.epoch_1970,
            ),
            Statistic::new("min", "Minimum Value", self.min),
            Statistic::new("max", "Maximum Value", self.max),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn reference() -> NaiveDateTime {
        at(2024, 6, 1, 12)
    }

    fn profile(values: Vec<Option<NaiveDateTime>>) -> DatetimeProfile {
        let col = DatetimeColumn::new("when", values);
        profile_datetime(&col, &ProfilerConfig::default(), reference())
    }

    #[test]
    fn test_epoch_placeholders_and_future() {
        let p = profile(vec![
            Some(at(1900, 1, 1, 0)),
            Some(at(1970, 1, 1, 0)),
            Some(at(2031, 3, 4, 0)),
            Some(at(2040, 7, 8, 0)),
            Some(at(2099, 12, 31, 0)),
        ]);

        assert_eq!(p.epoch_1900, 1);
        assert_eq!(p.epoch_1970, 1);
        assert_eq!(p.future, 3);
        assert_eq!(p.unique, 5);
        assert_eq!(p.min, Some(at(1900, 1, 1, 0)));
        assert_eq!(p.max, Some(at(2099, 12, 31, 0)));
    }

    #[test]
    fn test_placeholder_needs_exact_midnight() {
        let p = profile(vec![Some(at(1970, 1, 1, 5)), Some(at(1900, 1, 1, 1))]);
        assert_eq!(p.epoch_1970, 0);
        assert_eq!(p.epoch_1900, 0);
    }

    #[test]
    fn test_weekend_and_weekday() {
        // 2024-06-01 is a Saturday
        let p = profile(vec![
            Some(at(2024, 6, 1, 9)),
            Some(at(2024, 6, 2, 9)),
            Some(at(2024, 6, 3, 9)),
            Some(at(2024, 6, 7, 9)),
            None,
        ]);

        assert_eq!(p.weekend, 2);
        assert_eq!(p.weekday, 2);
        assert_eq!(p.missing, 1);
        assert_eq!(p.weekend + p.weekday, p.non_missing());
    }

    #[test]
    fn test_future_is_strict() {
        let p = profile(vec![Some(reference()), Some(at(2024, 6, 1, 13))]);
        assert_eq!(p.future, 1);
    }

    #[test]
    fn test_all_missing() {
        let p = profile(vec![None, None, None]);

        assert_eq!(p.missing, 3);
        assert_eq!(p.unique, 0);
        assert!(p.min.is_none());
        assert!(p.max.is_none());
        assert!(p.frequent.is_empty());
    }

    #[test]
    fn test_day_granularity_groups_same_day() {
        let p = profile(vec![
            Some(at(2024, 1, 2, 8)),
            Some(at(2024, 1, 3, 8)),
            Some(at(2024, 1, 3, 17)),
        ]);

        assert_eq!(p.unique, 3);
        assert_eq!(p.bar_chart.len(), 2);
        assert_eq!(p.bar_chart[0].value, "2024-01-03");
        assert_eq!(p.bar_chart[0].count, 2);
        assert_eq!(p.bar_chart[1].value, "2024-01-02");
    }

    #[test]
    fn test_timestamp_granularity_keeps_time() {
        let col = DatetimeColumn::new(
            "when",
            vec![Some(at(2024, 1, 3, 8)), Some(at(2024, 1, 3, 17))],
        );
        let config = ProfilerConfig::builder()
            .datetime_granularity(DatetimeGranularity::Timestamp)
            .build()
            .unwrap();
        let p = profile_datetime(&col, &config, reference());

        assert_eq!(p.frequent.len(), 2);
        assert_eq!(p.frequent[0].value, "2024-01-03 08:00:00");
    }
}
