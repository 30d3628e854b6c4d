//! Tail-focused summary of a completed sample set.

use serde::{Deserialize, Serialize};

use super::percentile::percentile_sorted;

/// Latency distribution summary in nanoseconds.
///
/// Computed once from a completed sample set, after sampling has finished.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Smallest sample.
    pub min: u64,
    /// Arithmetic mean.
    pub avg: f64,
    /// 50th percentile (nearest rank).
    pub p50: u64,
    /// 90th percentile (nearest rank).
    pub p90: u64,
    /// 99th percentile (nearest rank).
    pub p99: u64,
    /// 99.9th percentile (nearest rank).
    pub p999: u64,
    /// Largest sample.
    pub max: u64,
}

impl Stats {
    /// Summarize `samples` without modifying them.
    ///
    /// An empty slice yields all-zero stats rather than panicking.
    pub fn compute(samples: &[u64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        Self {
            min: sorted[0],
            avg: mean(&sorted),
            p50: percentile_sorted(&sorted, 0.50),
            p90: percentile_sorted(&sorted, 0.90),
            p99: percentile_sorted(&sorted, 0.99),
            p999: percentile_sorted(&sorted, 0.999),
            max: sorted[sorted.len() - 1],
        }
    }

    /// Spread between the 99.9th percentile and the median.
    pub fn tail_ratio(&self) -> f64 {
        if self.p50 == 0 {
            return 0.0;
        }
        self.p999 as f64 / self.p50 as f64
    }
}

/// Arithmetic mean with a 128-bit accumulator. Empty input yields 0.
pub fn mean(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: u128 = samples.iter().map(|&s| u128::from(s)).sum();
    sum as f64 / samples.len() as f64
}

/// Mean of each consecutive, full `window`-sized chunk of `samples`.
///
/// A trailing partial chunk is dropped. With `window` set to the page
/// count of a page-fault run, entry `k` is the mean cost of cycle `k`
/// over the region. Returns an empty vector for `window == 0`.
pub fn window_means(samples: &[u64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    samples.chunks_exact(window).map(mean).collect()
}
