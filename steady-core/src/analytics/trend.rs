//! Per-metric trend classification over a rolling window.
//!
//! The classifier compares the mean of the first half of a series against
//! the mean of the second half, with a dead-zone around zero difference to
//! suppress single-day noise. This deliberately favors stability over
//! sensitivity: trends that oscillate within a half-window are missed, and
//! that is an accepted trade-off.

use crate::types::{Trend, TrendResult};

/// Minimum number of samples before a non-stable classification is possible.
pub const MIN_TREND_SAMPLES: usize = 4;

/// Half-mean difference below which no trend is declared.
pub const TREND_DEAD_ZONE: f64 = 0.5;

/// Classify a chronological series of samples for one metric.
///
/// `inverted` flips the sign test for metrics where a numeric decrease is
/// the desirable direction (stress, anxiety).
///
/// Fewer than [`MIN_TREND_SAMPLES`] samples always yield [`Trend::Stable`];
/// an empty series additionally reports an average of 0.0 as a sentinel.
pub fn analyze(values: &[f64], inverted: bool) -> TrendResult {
    let average = mean(values);

    if values.len() < MIN_TREND_SAMPLES {
        return TrendResult {
            average,
            trend: Trend::Stable,
            values: values.to_vec(),
        };
    }

    // First half takes floor(n/2) samples; the middle element of an
    // odd-length series belongs to the second half. This tie-break is
    // observable in output and must not be changed to a symmetric split.
    let split = values.len() / 2;
    let first_mean = mean(&values[..split]);
    let second_mean = mean(&values[split..]);
    let diff = second_mean - first_mean;

    let trend = if diff.abs() <= TREND_DEAD_ZONE {
        Trend::Stable
    } else if (diff > 0.0) != inverted {
        Trend::Improving
    } else {
        Trend::Declining
    };

    TrendResult {
        average,
        trend,
        values: values.to_vec(),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
