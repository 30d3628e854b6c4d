//! Measurement infrastructure for latency sampling.
//!
//! This module provides:
//! - Monotonic nanosecond timing around a single unit of work
//! - The three workload strategies (baseline, syscall, page fault)
//! - Sample collection with an unmeasured warm-up phase
//!
//! # Clock Selection
//!
//! Timing always uses `std::time::Instant`. Cycle counters are avoided
//! because page-fault and syscall costs are wall-clock phenomena: the
//! thread may be descheduled inside the kernel, and those nanoseconds are
//! exactly what the experiment wants to surface.

mod collector;
mod timer;
mod workload;

pub use collector::Collector;
pub use timer::{black_box, elapsed_ns, Timer};
pub use workload::{Baseline, PageFault, PageRegion, Syscall, Workload};

use crate::error::HarnessError;
use crate::types::Mode;

/// Warm up, then collect `iterations` samples of `mode`'s workload.
///
/// Returns the samples in iteration order and the final accumulator.
/// For [`Mode::Pagefault`] one page is reserved per iteration, and at least
/// one page when `iterations` is zero.
pub fn run(mode: Mode, warmup: usize, iterations: usize) -> Result<(Vec<u64>, u64), HarnessError> {
    collect_mode(&Collector::new(warmup), mode, iterations, iterations.max(1))
}

/// Resolve `mode` to a concrete workload once, then hand it to the collector.
pub(crate) fn collect_mode(
    collector: &Collector,
    mode: Mode,
    iterations: usize,
    pages: usize,
) -> Result<(Vec<u64>, u64), HarnessError> {
    let collected = match mode {
        Mode::Baseline => collector.collect(iterations, &mut Baseline, 0),
        Mode::Syscall => collector.collect(iterations, &mut Syscall, 0),
        Mode::Pagefault => {
            let mut workload = PageFault::reserve(pages)?;
            collector.collect(iterations, &mut workload, 0)
        }
    };
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_returns_exact_count_for_every_mode() {
        for mode in Mode::ALL {
            if mode == Mode::Pagefault && cfg!(not(unix)) {
                continue;
            }
            for k in [0usize, 1, 257] {
                let (samples, _) =
                    run(mode, 10, k).unwrap_or_else(|e| panic!("{} x{}: {}", mode, k, e));
                assert_eq!(samples.len(), k, "{} x{}", mode, k);
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_pagefault_zero_iterations() {
        let (samples, sink) = run(Mode::Pagefault, 10, 0).unwrap();
        assert!(samples.is_empty());
        // Only warm-up arithmetic contributed to the accumulator.
        let (_, baseline_sink) = run(Mode::Baseline, 10, 0).unwrap();
        assert_eq!(sink, baseline_sink);
    }

    #[test]
    fn test_collect_mode_rejects_explicit_zero_pages() {
        let collector = Collector::with_timer(Timer::with_resolution_ns(1.0), 0);
        let result = collect_mode(&collector, Mode::Pagefault, 0, 0);
        assert!(matches!(result, Err(HarnessError::EmptyRegion)));
    }
}
