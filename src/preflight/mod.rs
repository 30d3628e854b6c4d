//! Checks that flag unreliable measurement conditions.
//!
//! # Checks Performed
//!
//! - **System**: host settings that widen the distribution (Linux only),
//!   run before sampling
//! - **Resolution**: clock quantization in the collected samples, run
//!   after sampling
//!
//! Warnings never abort a run.

mod resolution;
mod system;

pub use resolution::{resolution_check, ResolutionWarning};
pub use system::{system_check, SystemWarning};

use serde::{Deserialize, Serialize};

/// Collection of all warnings from preflight checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreflightWarnings {
    /// Warnings from host checks.
    pub system: Vec<SystemWarning>,

    /// Warnings from the clock resolution check.
    pub resolution: Vec<ResolutionWarning>,
}

impl PreflightWarnings {
    /// Create an empty warnings collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total number of warnings.
    pub fn count(&self) -> usize {
        self.system.len() + self.resolution.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Whether any warning makes the percentiles meaningless.
    pub fn has_critical(&self) -> bool {
        self.system.iter().any(SystemWarning::is_critical)
            || self.resolution.iter().any(ResolutionWarning::is_critical)
    }

    /// Descriptions of every warning, system checks first.
    pub fn descriptions(&self) -> Vec<String> {
        self.system
            .iter()
            .map(SystemWarning::description)
            .chain(self.resolution.iter().map(ResolutionWarning::description))
            .collect()
    }
}
