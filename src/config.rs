//! Configuration for a measurement run.

use std::env;

/// Configuration options for [`Harness`](crate::Harness).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Unmeasured warm-up iterations before sampling (default: 50,000).
    pub warmup: usize,

    /// Measured iterations for the baseline and syscall modes (default: 1,000,000).
    pub iterations: usize,

    /// Measured iterations for the page-fault mode (default: 200,000).
    ///
    /// Kept smaller than `iterations` so the default reservation stays
    /// within laptop memory.
    pub pagefault_iterations: usize,

    /// Pages reserved for the page-fault mode.
    ///
    /// `None` reserves one page per page-fault iteration, so every
    /// measured access is a first touch.
    pub pagefault_pages: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warmup: 50_000,
            iterations: 1_000_000,
            pagefault_iterations: 200_000,
            pagefault_pages: None,
        }
    }
}

impl Config {
    /// Default configuration overlaid with `LATENCY_*` environment variables.
    ///
    /// Recognized: `LATENCY_WARMUP`, `LATENCY_ITERATIONS`,
    /// `LATENCY_PAGEFAULT_ITERATIONS`, `LATENCY_PAGEFAULT_PAGES`.
    /// Values that do not parse as unsigned integers are ignored.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Overlay `LATENCY_*` environment variables onto this configuration.
    pub fn merge_env(mut self) -> Self {
        if let Some(warmup) = parse_usize_env("LATENCY_WARMUP") {
            self.warmup = warmup;
        }
        if let Some(iterations) = parse_usize_env("LATENCY_ITERATIONS") {
            self.iterations = iterations;
        }
        if let Some(iterations) = parse_usize_env("LATENCY_PAGEFAULT_ITERATIONS") {
            self.pagefault_iterations = iterations;
        }
        if let Some(pages) = parse_usize_env("LATENCY_PAGEFAULT_PAGES") {
            self.pagefault_pages = Some(pages);
        }
        self
    }

    /// Pages the page-fault workload will reserve.
    ///
    /// Without an explicit count this is one page per iteration, never
    /// fewer than one. An explicit `Some(0)` is passed through and rejected
    /// at reservation.
    pub fn resolved_pagefault_pages(&self) -> usize {
        self.pagefault_pages.unwrap_or_else(|| self.pagefault_iterations.max(1))
    }
}

fn parse_usize_env(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|v| v.trim().replace('_', "").parse().ok())
}
