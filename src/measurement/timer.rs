//! Monotonic nanosecond timing.
//!
//! All measurements use `std::time::Instant`, which is backed by a
//! monotonic clock (`CLOCK_MONOTONIC` on Linux, `mach_absolute_time` on
//! macOS, `QueryPerformanceCounter` on Windows) and is immune to
//! wall-clock adjustments.

use std::hint::black_box as std_black_box;
use std::time::Instant;

/// Wrapper around `std::hint::black_box` for preventing compiler optimizations.
///
/// Use this to wrap the result of measured work so the compiler cannot
/// elide it or hoist it out of the timed region.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Nanoseconds elapsed between two clock readings, saturating at zero.
#[inline]
pub fn elapsed_ns(start: Instant, end: Instant) -> u64 {
    let nanos = end.saturating_duration_since(start).as_nanos();
    u64::try_from(nanos).unwrap_or(u64::MAX)
}

/// Empirically measure clock resolution by finding the minimum non-zero
/// difference between back-to-back reads.
fn measure_timer_resolution() -> f64 {
    let mut min_diff = u64::MAX;

    for _ in 0..1000 {
        let t1 = Instant::now();
        let mut t2 = Instant::now();
        // Spin until the clock ticks so a coarse clock is not reported as 0.
        let mut spins = 0;
        while t2 == t1 && spins < 10_000 {
            t2 = Instant::now();
            spins += 1;
        }
        let diff = elapsed_ns(t1, t2);
        if diff > 0 && diff < min_diff {
            min_diff = diff;
        }
    }

    if min_diff == u64::MAX {
        1.0
    } else {
        min_diff as f64
    }
}

/// Monotonic timer for bracketing a single unit of work.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Estimated clock resolution in nanoseconds.
    resolution_ns: f64,
}

impl Timer {
    /// Create a new timer, estimating clock resolution once.
    pub fn new() -> Self {
        Self {
            resolution_ns: measure_timer_resolution(),
        }
    }

    /// Create a timer with a known resolution, skipping estimation.
    pub fn with_resolution_ns(resolution_ns: f64) -> Self {
        Self { resolution_ns }
    }

    /// Get the estimated clock resolution in nanoseconds.
    ///
    /// Typically tens of nanoseconds or less on Linux with a vDSO clock.
    pub fn resolution_ns(&self) -> f64 {
        self.resolution_ns
    }

    /// Human-readable name of the clock source.
    pub fn name(&self) -> &'static str {
        "monotonic"
    }

    /// Time one invocation of `f` in nanoseconds.
    ///
    /// The two clock reads bracket only `f`; the result passes through
    /// [`black_box`] before the closing read.
    #[inline(always)]
    pub fn measure<F, T>(&self, f: F) -> (T, u64)
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let out = black_box(f());
        let end = Instant::now();
        (out, elapsed_ns(start, end))
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_monotonic() {
        let mut last = Instant::now();
        for _ in 0..10_000 {
            let now = Instant::now();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_elapsed_saturates_when_reversed() {
        let a = Instant::now();
        let b = a + Duration::from_nanos(500);
        assert_eq!(elapsed_ns(a, b), 500);
        assert_eq!(elapsed_ns(b, a), 0);
    }

    #[test]
    fn test_timer_measure() {
        let timer = Timer::with_resolution_ns(1.0);
        let (sum, ns) = timer.measure(|| {
            std::thread::sleep(Duration::from_millis(1));
            (0..1000u64).fold(0u64, |acc, i| acc.wrapping_add(i))
        });
        assert_eq!(sum, 499_500);
        assert!(ns >= 1_000_000, "ns = {}", ns);
    }

    #[test]
    fn test_timer_resolution_reasonable() {
        let timer = Timer::new();
        let resolution = timer.resolution_ns();
        // Sub-microsecond on any platform we care about.
        assert!(
            resolution > 0.0 && resolution < 1_000_000.0,
            "resolution_ns = {}",
            resolution
        );
    }
}
