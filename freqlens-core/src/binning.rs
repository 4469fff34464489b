use crate::samples::parse_samples;
use freqlens_common::BinningConfig;
use serde::{Deserialize, Serialize};

/// How far past the sample maximum the last interval is pushed so `max` lands inside it.
pub const LAST_EDGE_PAD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub mark: f64,
    pub frequency: usize,
    pub relative_frequency: f64,
    pub cumulative_frequency: usize,
    pub cumulative_relative_frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub n: usize,
    pub sturges_k: usize,
    pub k: usize,
    pub interval_width: f64,
    pub intervals: Vec<Interval>,
    /// Samples no interval accepted. Only happens when `max + LAST_EDGE_PAD`
    /// rounds back to `max` and the arithmetic last edge does not clear it.
    pub unplaced: usize,
}

/// `ceil(1 + 3.322 * log10(n))`, which is 1 for a single sample.
pub fn sturges_k(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (1.0 + 3.322 * (n as f64).log10()).ceil() as usize
}

pub fn effective_k(sturges_k: usize, config: &BinningConfig) -> usize {
    if !config.manual_intervals {
        return sturges_k;
    }
    (sturges_k as i64 + config.interval_count_adjustment as i64).max(1) as usize
}

/// Width shared by every interval. May come out zero or negative; that is not rejected.
pub fn interval_width(range: f64, k: usize, config: &BinningConfig) -> f64 {
    let width = range / k as f64 + config.interval_width_adjustment;
    if config.round_up_width {
        width.ceil()
    } else {
        width
    }
}

/// Parses `raw` and bins it. `None` when no token is a finite number.
pub fn compute(raw: &str, config: &BinningConfig) -> Option<Distribution> {
    compute_samples(&parse_samples(raw), config)
}

pub fn compute_samples(values: &[f64], config: &BinningConfig) -> Option<Distribution> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let n = values.len();

    let sturges_k = sturges_k(n);
    let k = effective_k(sturges_k, config);
    let width = interval_width(range, k, config);

    let mut intervals: Vec<Interval> = (0..k)
        .map(|i| {
            let start = min + i as f64 * width;
            let mut end = min + (i + 1) as f64 * width;
            if i == k - 1 {
                end = end.max(max + LAST_EDGE_PAD);
            }
            Interval {
                start,
                end,
                mark: (start + end) / 2.0,
                frequency: 0,
                relative_frequency: 0.0,
                cumulative_frequency: 0,
                cumulative_relative_frequency: 0.0,
            }
        })
        .collect();

    let mut unplaced = 0;
    for &v in values {
        // with a non-positive width the bins overlap or invert, so first match wins
        match intervals.iter().position(|b| v >= b.start && v < b.end) {
            Some(idx) => intervals[idx].frequency += 1,
            None => unplaced += 1,
        }
    }

    let mut cumulative = 0;
    for b in &mut intervals {
        cumulative += b.frequency;
        b.relative_frequency = b.frequency as f64 / n as f64;
        b.cumulative_frequency = cumulative;
        b.cumulative_relative_frequency = cumulative as f64 / n as f64;
    }

    Some(Distribution {
        min,
        max,
        range,
        n,
        sturges_k,
        k,
        interval_width: width,
        intervals,
        unplaced,
    })
}
