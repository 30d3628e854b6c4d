//! Run result types and related structures.

use serde::{Deserialize, Serialize};

use crate::preflight::PreflightWarnings;
use crate::statistics::Stats;
use crate::types::Mode;

/// Complete result of one measurement run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Workload that was measured.
    pub mode: Mode,

    /// Per-iteration latencies in nanoseconds, in iteration order.
    pub samples: Vec<u64>,

    /// Summary of `samples`.
    pub stats: Stats,

    /// Final accumulator value. Printed so the workload cannot be elided.
    pub sink: u64,

    /// Mean latency of each full pass over the page-fault region.
    ///
    /// Present only for [`Mode::Pagefault`]. Entry 0 is the cold pass.
    pub page_cycle_means: Option<Vec<f64>>,

    /// Warnings collected before and after sampling.
    pub warnings: PreflightWarnings,

    /// Metadata for debugging.
    pub metadata: Metadata,
}

/// Context of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Unmeasured warm-up iterations.
    pub warmup_iterations: usize,

    /// Measured iterations (equals the sample count).
    pub iterations: usize,

    /// Pages reserved for the page-fault workload; 0 for other modes.
    pub pages: usize,

    /// Clock source name.
    pub timer: String,

    /// Estimated clock resolution in nanoseconds.
    pub timer_resolution_ns: f64,

    /// Wall-clock duration of the sampling phase, warm-up included.
    pub sampling_secs: f64,
}

/// Serializable report of a run.
///
/// Carries the ordered samples only when requested, since a default
/// run produces a million of them.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    /// Workload that was measured.
    pub mode: Mode,
    /// Summary statistics.
    pub stats: &'a Stats,
    /// Final accumulator value.
    pub sink: u64,
    /// Mean per page-fault cycle, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_cycle_means: Option<&'a [f64]>,
    /// Warning descriptions.
    pub warnings: Vec<String>,
    /// Run context.
    pub metadata: &'a Metadata,
    /// Ordered samples, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<&'a [u64]>,
}

impl Run {
    /// Build a report view of this run.
    pub fn report(&self, include_samples: bool) -> Report<'_> {
        Report {
            mode: self.mode,
            stats: &self.stats,
            sink: self.sink,
            page_cycle_means: self.page_cycle_means.as_deref(),
            warnings: self.warnings.descriptions(),
            metadata: &self.metadata,
            samples: include_samples.then_some(self.samples.as_slice()),
        }
    }
}
