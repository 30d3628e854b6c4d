//! Statistical summaries of latency samples.
//!
//! This module provides the tail-statistics engine:
//! - Nearest-rank percentile computation
//! - The min/avg/p50/p90/p99/p99.9/max summary
//! - Windowed means for inspecting how the tail decays over a run

mod percentile;
mod summary;

pub use percentile::{percentile, percentile_sorted};
pub use summary::{mean, window_means, Stats};
