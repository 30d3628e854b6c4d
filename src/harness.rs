//! Main `Harness` entry point and builder.

use std::time::Instant;

use crate::config::Config;
use crate::error::HarnessError;
use crate::measurement::{collect_mode, Collector, Timer};
use crate::preflight::{resolution_check, system_check, PreflightWarnings};
use crate::result::{Metadata, Run};
use crate::statistics::{window_means, Stats};
use crate::types::Mode;

/// Main entry point for latency measurement.
///
/// # Example
///
/// ```no_run
/// use tail_latency::{Harness, Mode};
///
/// let run = Harness::new()
///     .warmup(10_000)
///     .iterations(100_000)
///     .run(Mode::Syscall)?;
///
/// println!("p99.9 = {} ns", run.stats.p999);
/// # Ok::<(), tail_latency::HarnessError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    config: Config,
    /// Clock resolution override; estimated at run time when `None`.
    timer: Option<Timer>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// Create from an explicit configuration.
    pub fn from_config(config: Config) -> Self {
        Self { config, timer: None }
    }

    /// Create with small iteration counts for tests.
    ///
    /// - 2,000 warm-up iterations (vs 50,000 default)
    /// - 20,000 iterations (vs 1,000,000 default)
    /// - 4,096 page-fault iterations over 1,024 pages
    pub fn quick() -> Self {
        Self::from_config(Config {
            warmup: 2_000,
            iterations: 20_000,
            pagefault_iterations: 4_096,
            pagefault_pages: Some(1_024),
        })
    }

    /// Set unmeasured warm-up iterations.
    pub fn warmup(mut self, n: usize) -> Self {
        self.config.warmup = n;
        self
    }

    /// Set measured iterations for the baseline and syscall modes.
    pub fn iterations(mut self, n: usize) -> Self {
        self.config.iterations = n;
        self
    }

    /// Set measured iterations for the page-fault mode.
    pub fn pagefault_iterations(mut self, n: usize) -> Self {
        self.config.pagefault_iterations = n;
        self
    }

    /// Set the page count of the page-fault region.
    pub fn pagefault_pages(mut self, n: usize) -> Self {
        self.config.pagefault_pages = Some(n);
        self
    }

    /// Use a pre-built timer instead of estimating its resolution per run.
    pub fn timer(mut self, timer: Timer) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Iterations `mode` will measure under this configuration.
    pub fn iterations_for(&self, mode: Mode) -> usize {
        match mode {
            Mode::Pagefault => self.config.pagefault_iterations,
            Mode::Baseline | Mode::Syscall => self.config.iterations,
        }
    }

    /// Resolve `name` permissively and run it.
    ///
    /// Missing or unknown names run [`Mode::Baseline`].
    pub fn run_named(&self, name: Option<&str>) -> Result<Run, HarnessError> {
        let mode = Mode::from_arg(name);
        if let Some(name) = name.filter(|n| *n != mode.name()) {
            tracing::debug!(requested = name, resolved = %mode, "unrecognized mode, using default");
        }
        self.run(mode)
    }

    /// Warm up, sample `mode`, then summarize.
    ///
    /// Statistics and the resolution check run only after every sample has
    /// been collected.
    pub fn run(&self, mode: Mode) -> Result<Run, HarnessError> {
        let mut warnings = PreflightWarnings {
            system: system_check(),
            ..PreflightWarnings::default()
        };

        let timer = self.timer.clone().unwrap_or_default();
        let collector = Collector::with_timer(timer, self.config.warmup);
        let resolution_ns = collector.timer().resolution_ns();

        let iterations = self.iterations_for(mode);
        let pages = match mode {
            Mode::Pagefault => self.config.resolved_pagefault_pages(),
            Mode::Baseline | Mode::Syscall => 0,
        };

        tracing::info!(
            %mode,
            warmup = self.config.warmup,
            iterations,
            pages,
            resolution_ns,
            "starting sampling"
        );

        let started = Instant::now();
        let (samples, sink) = collect_mode(&collector, mode, iterations, pages)?;
        let sampling_secs = started.elapsed().as_secs_f64();

        tracing::debug!(samples = samples.len(), sampling_secs, "sampling complete");

        let stats = Stats::compute(&samples);
        tracing::info!(
            p50 = stats.p50,
            p999 = stats.p999,
            tail_ratio = stats.tail_ratio(),
            "summarized samples"
        );
        warnings.resolution.extend(resolution_check(&samples, resolution_ns));
        let page_cycle_means = (mode == Mode::Pagefault).then(|| window_means(&samples, pages));

        Ok(Run {
            mode,
            samples,
            stats,
            sink,
            page_cycle_means,
            warnings,
            metadata: Metadata {
                warmup_iterations: self.config.warmup,
                iterations,
                pages,
                timer: collector.timer().name().to_string(),
                timer_resolution_ns: resolution_ns,
                sampling_secs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> Harness {
        Harness::quick().timer(Timer::with_resolution_ns(1.0))
    }

    #[test]
    fn test_builder() {
        let h = Harness::new()
            .warmup(5)
            .iterations(6)
            .pagefault_iterations(7)
            .pagefault_pages(8);
        assert_eq!(
            h.config(),
            &Config {
                warmup: 5,
                iterations: 6,
                pagefault_iterations: 7,
                pagefault_pages: Some(8),
            }
        );
        assert_eq!(h.iterations_for(Mode::Syscall), 6);
        assert_eq!(h.iterations_for(Mode::Pagefault), 7);
    }

    #[test]
    fn test_run_baseline() {
        let run = harness().iterations(500).run(Mode::Baseline).unwrap();
        assert_eq!(run.mode, Mode::Baseline);
        assert_eq!(run.samples.len(), 500);
        assert_eq!(run.metadata.iterations, 500);
        assert_eq!(run.metadata.pages, 0);
        assert!(run.page_cycle_means.is_none());
        assert_eq!(run.stats, Stats::compute(&run.samples));
    }

    #[test]
    fn test_run_named_unknown_matches_baseline() {
        let h = harness().iterations(200);
        let unknown = h.run_named(Some("definitely-not-a-mode")).unwrap();
        let baseline = h.run_named(Some("baseline")).unwrap();
        let missing = h.run_named(None).unwrap();
        assert_eq!(unknown.mode, Mode::Baseline);
        assert_eq!(missing.mode, Mode::Baseline);
        // Same workload over the same iteration count gives the same sink.
        assert_eq!(unknown.sink, baseline.sink);
        assert_eq!(missing.sink, baseline.sink);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_pagefault_cycle_means() {
        let run = harness()
            .pagefault_iterations(64)
            .pagefault_pages(16)
            .run(Mode::Pagefault)
            .unwrap();
        assert_eq!(run.samples.len(), 64);
        assert_eq!(run.metadata.pages, 16);
        assert_eq!(run.page_cycle_means.as_ref().map(Vec::len), Some(4));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_pagefault_zero_iterations_default_pages() {
        let run = Harness::new()
            .warmup(100)
            .pagefault_iterations(0)
            .timer(Timer::with_resolution_ns(1.0))
            .run(Mode::Pagefault)
            .unwrap();
        assert!(run.samples.is_empty());
        assert_eq!(run.stats, Stats::default());
        assert_eq!(run.metadata.pages, 1);
        assert_eq!(run.page_cycle_means.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_run_pagefault_zero_pages_fails() {
        let result = harness().pagefault_pages(0).run(Mode::Pagefault);
        assert!(matches!(result, Err(HarnessError::EmptyRegion)));
    }
}
