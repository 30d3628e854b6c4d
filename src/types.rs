//! Workload mode selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// The unit of work executed once per measured iteration.
///
/// Chosen once per run; the sampling loop never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pure user-space arithmetic. The control condition.
    #[default]
    Baseline,
    /// Baseline arithmetic plus one trivial kernel-boundary call.
    Syscall,
    /// First-touch access to a reserved but untouched memory region.
    Pagefault,
}

impl Mode {
    /// Every mode, in report order.
    pub const ALL: [Mode; 3] = [Mode::Baseline, Mode::Syscall, Mode::Pagefault];

    /// Resolve a mode from an optional command-line argument.
    ///
    /// Missing or unrecognized names fall back to [`Mode::Baseline`]
    /// without raising an error. Use [`Mode::parse_strict`] to reject them.
    pub fn from_arg(arg: Option<&str>) -> Self {
        arg.and_then(Self::lookup).unwrap_or_default()
    }

    /// Resolve a mode name, rejecting anything that is not an exact match.
    pub fn parse_strict(name: &str) -> Result<Self, HarnessError> {
        Self::lookup(name).ok_or_else(|| HarnessError::UnknownMode(name.to_string()))
    }

    /// Lowercase name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Baseline => "baseline",
            Mode::Syscall => "syscall",
            Mode::Pagefault => "pagefault",
        }
    }

    fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
