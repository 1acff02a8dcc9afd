//! Statistics and histogram for numeric columns.
//!
//! Infinite values are real, present values: they count toward min, max,
//! mean and the frequency table. They have no place on a finite axis, so
//! the histogram only buckets finite values and its counts sum to the
//! number of finite non-missing cells.

use super::frequency::FrequencyCounter;
use crate::column::NumericColumn;
use crate::config::ProfilerConfig;
use crate::types::{HistogramBucket, NumericProfile, Statistic};
use crate::utils::format_bound;
use polars::prelude::*;
use tracing::debug;

/// Profile one numeric column.
pub fn profile_numeric(column: &NumericColumn, config: &ProfilerConfig) -> NumericProfile {
    let mut present: Vec<f64> = column.present().collect();
    let missing = column.len() - present.len();

    // -0.0 and 0.0 are the same value; adding 0.0 folds the sign away
    let counter: FrequencyCounter<u64> = present.iter().map(|x| (x + 0.0).to_bits()).collect();

    let zeros = present.iter().filter(|&&x| x == 0.0).count();
    let negatives = present.iter().filter(|&&x| x < 0.0).count();

    // NaN never reaches here, so a NaN aggregate means inf - inf
    let series = Series::new(column.name.as_str().into(), present.as_slice());
    let mean = series.mean().filter(|m| !m.is_nan());
    let median = series.median().filter(|m| !m.is_nan());
    let std = mean
        .and_then(|m| calculate_std(&present, m))
        .filter(|s| !s.is_nan());

    let histogram = build_histogram(&present, config.histogram_bins);

    present.sort_by(f64::total_cmp);
    let min = present.first().copied();
    let max = present.last().copied();

    debug!(
        "Profiled numeric column '{}': {} values, {} missing",
        column.name,
        present.len(),
        missing
    );

    NumericProfile {
        name: column.name.clone(),
        row_count: column.len(),
        unique: counter.distinct(),
        missing,
        zeros,
        negatives,
        mean,
        std,
        min,
        max,
        median,
        histogram,
        frequent: counter.top_k(config.top_k, |bits| f64::from_bits(*bits).to_string()),
    }
}

/// Sample standard deviation (N - 1 denominator). Undefined below two values.
pub(crate) fn calculate_std(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Equal-width histogram over the finite values, spanning `[min, max]`.
///
/// Buckets are `[lower, upper)` except the last, which is `[lower, upper]`.
/// A single distinct value produces one closed bucket. Infinite values are
/// left out.
pub(crate) fn build_histogram(values: &[f64], bins: usize) -> Vec<HistogramBucket> {
    let finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();

    let (Some(min), Some(max)) = (
        finite.iter().copied().min_by(f64::total_cmp),
        finite.iter().copied().max_by(f64::total_cmp),
    ) else {
        return Vec::new();
    };

    if bins == 0 {
        return Vec::new();
    }

    if min >= max {
        return vec![HistogramBucket {
            label: format!("[{}, {}]", format_bound(min), format_bound(max)),
            lower: min,
            upper: max,
            upper_inclusive: true,
            count: finite.len(),
        }];
    }

    // halves keep every difference below f64::MAX, even for -1e308..1e308
    let half_span = max / 2.0 - min / 2.0;
    let mut edges: Vec<f64> = (0..bins)
        .map(|i| {
            let t = i as f64 / bins as f64;
            min * (1.0 - t) + max * t
        })
        .collect();
    edges.push(max);

    let mut counts = vec![0usize; bins];
    for &x in &finite {
        let t = (x / 2.0 - min / 2.0) / half_span;
        let mut idx = ((t * bins as f64).floor() as usize).min(bins - 1);
        // the estimate can be off by one at bucket edges
        while idx > 0 && x < edges[idx] {
            idx -= 1;
        }
        while idx + 1 < bins && x >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let last = i + 1 == bins;
            let (lower, upper) = (edges[i], edges[i + 1]);
            let close = if last { ']' } else { ')' };
            HistogramBucket {
                label: format!("[{}, {}{}", format_bound(lower), format_bound(upper), close),
                lower,
                upper,
                upper_inclusive: last,
                count,
            }
        })
        .collect()
}

impl NumericProfile {
    /// Number of non-missing cells.
    pub fn non_missing(&self) -> usize {
        self.row_count - self.missing
    }

    pub fn statistics(&self) -> Vec<Statistic> {
        vec![
            Statistic::count("unique", "Number of Unique Values", self.unique),
            Statistic::count("missing", "Number of Missing Values", self.missing),
            Statistic::count("zeros", "Number of Rows with 0", self.zeros),
            Statistic::count(
                "negatives",
                "Number of Rows with Negative Values",
                self.negatives,
            ),
            Statistic::new("mean", "Average Value", self.mean),
            Statistic::new("std", "Standard Deviation Value", self.std),
            Statistic::new("min", "Minimum Value", self.min),
            Statistic::new("max", "Maximum Value", self.max),
            Statistic::new("median", "Median Value", self.median),
        ]
    }
}
