//! Sample collection: unmeasured warm-up followed by the timed loop.
//!
//! Dispatch on the workload happens once, by monomorphizing
//! [`Collector::collect`] over the concrete [`Workload`] type. The measured
//! loop body is one [`Timer::measure`] around one `execute` call and a
//! push into pre-allocated storage.

use super::timer::{black_box, Timer};
use super::workload::Workload;

/// Multiplier used by the warm-up arithmetic.
const WARMUP_MUL: u64 = 1_315_423_911;

/// Collector for per-iteration latency samples.
#[derive(Debug, Clone)]
pub struct Collector {
    /// The timer used for measurements.
    timer: Timer,
    /// Number of warmup iterations to run before measuring.
    warmup_iterations: usize,
}

impl Collector {
    /// Create a new collector with the given warmup iterations.
    pub fn new(warmup_iterations: usize) -> Self {
        Self::with_timer(Timer::new(), warmup_iterations)
    }

    /// Create a collector with a pre-calibrated timer.
    pub fn with_timer(timer: Timer, warmup_iterations: usize) -> Self {
        Self {
            timer,
            warmup_iterations,
        }
    }

    /// Get a reference to the internal timer.
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Number of warm-up iterations run before each collection.
    pub fn warmup_iterations(&self) -> usize {
        self.warmup_iterations
    }

    /// Run warmup iterations of generic arithmetic.
    ///
    /// Stabilizes instruction cache and branch predictor state. Does not
    /// run the selected workload, so the page-fault region stays untouched.
    fn warmup(&self, mut sink: u64) -> u64 {
        for i in 0..self.warmup_iterations {
            sink = black_box(sink.wrapping_add((i as u64).wrapping_mul(WARMUP_MUL)));
        }
        sink
    }

    /// Collect exactly `iterations` samples of `workload`, in iteration order.
    ///
    /// `sink` seeds the accumulator threaded through warm-up and every
    /// workload call. Returns the samples (nanoseconds) and the final
    /// accumulator.
    pub fn collect<W: Workload>(&self, iterations: usize, workload: &mut W, sink: u64) -> (Vec<u64>, u64) {
        let mut acc = self.warmup(sink);
        let mut samples = Vec::with_capacity(iterations);

        for i in 0..iterations {
            let (next, ns) = self.timer.measure(|| workload.execute(i, acc));
            acc = next;
            samples.push(ns);
        }

        (samples, acc)
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(1000)
    }
}
