//! Error type for harness setup failures.

use std::io;

/// Failures that abort a run before or during setup.
///
/// None of these are retried: a run either completes every configured
/// iteration or produces nothing.
#[derive(Debug)]
pub enum HarnessError {
    /// The page-fault backing region could not be reserved.
    Reservation {
        /// Size of the requested mapping.
        bytes: usize,
        /// Error reported by the operating system.
        source: io::Error,
    },
    /// The page-fault region was configured with zero pages.
    EmptyRegion,
    /// The requested workload needs facilities this platform lacks.
    UnsupportedPlatform,
    /// A mode name was rejected under strict parsing.
    UnknownMode(String),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Reservation { bytes, source } => {
                write!(f, "failed to reserve {} bytes for page-fault workload: {}", bytes, source)
            }
            HarnessError::EmptyRegion => write!(f, "page-fault workload needs at least one page"),
            HarnessError::UnsupportedPlatform => {
                write!(f, "page-fault workload requires a unix platform with mmap")
            }
            HarnessError::UnknownMode(name) => write!(f, "unknown mode: {}", name),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Reservation { source, .. } => Some(source),
            _ => None,
        }
    }
}
