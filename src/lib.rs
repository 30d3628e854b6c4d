//! # tail-latency
//!
//! Measure what rare system events do to worst-case latency.
//!
//! This crate isolates a tiny unit of work, times every execution at
//! nanosecond resolution, and summarizes the distribution with a
//! tail-focused set of numbers: min, average, p50, p90, p99, p99.9, max.
//! Three workloads are provided:
//! - **baseline**: a few arithmetic operations, the control condition
//! - **syscall**: the same arithmetic plus one trivial kernel entry
//! - **pagefault**: first touch of pages in a reserved, untouched region
//!
//! The mean barely moves between them; the tail does not.
//!
//! ## Measurement Discipline
//!
//! - Warm-up runs generic arithmetic, unmeasured, before sampling.
//! - Only the workload call sits between the two clock reads. The workload
//!   is chosen before the loop, so the loop never branches on the mode.
//! - Statistics are computed after the last sample is taken.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tail_latency::{output, Harness, Mode};
//!
//! let run = Harness::new().run(Mode::Pagefault)?;
//! print!("{}", output::format_stats(&run.stats));
//! # Ok::<(), tail_latency::HarnessError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod harness;
mod result;
mod types;

// Functional modules
pub mod measurement;
pub mod output;
pub mod preflight;
pub mod statistics;

// Re-exports for public API
pub use config::Config;
pub use error::HarnessError;
pub use harness::Harness;
pub use measurement::{Collector, Timer, Workload};
pub use result::{Metadata, Report, Run};
pub use statistics::Stats;
pub use types::Mode;

/// Run `mode` with the default configuration.
///
/// Equivalent to `Harness::new().run(mode)`.
pub fn measure(mode: Mode) -> Result<Run, HarnessError> {
    Harness::new().run(mode)
}

/// Summarize a completed sample set.
///
/// Equivalent to [`Stats::compute`]. Never mutates `samples`.
pub fn compute(samples: &[u64]) -> Stats {
    Stats::compute(samples)
}
