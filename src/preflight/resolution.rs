//! Clock resolution check, run after sampling.
//!
//! The baseline workload costs a few nanoseconds. On a coarse clock most
//! baseline samples read as zero and every percentile collapses onto a
//! handful of tick values.

use serde::{Deserialize, Serialize};

/// Warning from the resolution check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolutionWarning {
    /// Most samples are zero: the work is faster than one clock tick.
    InsufficientResolution {
        /// Number of distinct sample values.
        unique_values: usize,
        /// Total number of samples.
        total_samples: usize,
        /// Fraction of samples that were exactly zero.
        zero_fraction: f64,
        /// Estimated clock resolution in nanoseconds.
        timer_resolution_ns: f64,
    },

    /// Very few distinct sample values.
    HighQuantization {
        /// Number of distinct sample values.
        unique_values: usize,
        /// Total number of samples.
        total_samples: usize,
    },
}

impl ResolutionWarning {
    /// Whether percentiles from this run are meaningless.
    pub fn is_critical(&self) -> bool {
        matches!(self, ResolutionWarning::InsufficientResolution { .. })
    }

    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            ResolutionWarning::InsufficientResolution {
                unique_values,
                total_samples,
                zero_fraction,
                timer_resolution_ns,
            } => format!(
                "Clock resolution (~{:.0}ns) is too coarse for this workload: \
                 {} distinct values in {} samples, {:.1}% zero. \
                 Percentiles below the tick size are not meaningful.",
                timer_resolution_ns,
                unique_values,
                total_samples,
                zero_fraction * 100.0
            ),
            ResolutionWarning::HighQuantization {
                unique_values,
                total_samples,
            } => format!(
                "Only {} distinct values in {} samples; percentiles are quantized \
                 to clock ticks.",
                unique_values, total_samples
            ),
        }
    }
}

impl std::fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description())
    }
}

/// Samples below this count are not assessed.
const MIN_SAMPLES: usize = 100;

/// Distinct values below this count trigger a warning.
const MIN_UNIQUE: usize = 5;

/// Fraction of zero samples that triggers the critical warning.
const CRITICAL_ZERO_FRACTION: f64 = 0.5;

/// Check a completed sample set for clock quantization.
pub fn resolution_check(samples: &[u64], timer_resolution_ns: f64) -> Option<ResolutionWarning> {
    if samples.len() < MIN_SAMPLES {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let unique_values = sorted.len();

    let zeros = samples.iter().filter(|&&s| s == 0).count();
    let zero_fraction = zeros as f64 / samples.len() as f64;

    if zero_fraction > CRITICAL_ZERO_FRACTION {
        return Some(ResolutionWarning::InsufficientResolution {
            unique_values,
            total_samples: samples.len(),
            zero_fraction,
            timer_resolution_ns,
        });
    }

    if unique_values < MIN_UNIQUE {
        return Some(ResolutionWarning::HighQuantization {
            unique_values,
            total_samples: samples.len(),
        });
    }

    None
}
