// Pure reduction of one metric's samples within one bucket.

use crate::models::{SubValue, SummaryPoint};
use chrono::{DateTime, Local};

/// Reduce `samples` to a summary point labeled `x`.
/// Envelope: the wider of mean +/- stdev (sample) and the observed min/max.
/// Zero samples yield an all-zero point so the bucket stays in the report;
/// a single sample yields a degenerate [v, v] envelope.
pub fn make_point(x: DateTime<Local>, samples: &[f64]) -> SummaryPoint {
    if samples.is_empty() {
        return SummaryPoint {
            x,
            y: [0.0, 0.0],
            subvalue: SubValue { range: [0.0, 0.0] },
        };
    }

    let low = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let high = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let sd = sample_std_dev(samples, mean);

    SummaryPoint {
        x,
        y: [(mean - sd).min(low), (mean + sd).max(high)],
        subvalue: SubValue { range: [low, high] },
    }
}

/// Sample standard deviation (n−1 divisor). Zero for fewer than two samples.
fn sample_std_dev(samples: &[f64], mean: f64) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}
