//! Host configuration checks run before sampling.
//!
//! None of these invalidate a run. They flag settings known to widen the
//! latency distribution independently of the workload under study.

use serde::{Deserialize, Serialize};

/// Warning from system checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SystemWarning {
    /// CPU frequency scaling is not set to performance mode.
    CpuGovernorNotPerformance {
        /// Current governor setting.
        current: String,
    },

    /// Turbo boost is enabled (frequency shifts mid-run).
    TurboBoostEnabled,

    /// Transparent hugepages are set to `always`.
    ///
    /// The page-fault region opts out with `MADV_NOHUGEPAGE`, but other
    /// allocations may still be collapsed by khugepaged during the run.
    TransparentHugepagesAlways,

    /// Running under a hypervisor.
    VirtualMachineDetected,

    /// One-minute load average above the threshold.
    HighSystemLoad {
        /// Current load average.
        load_average: f64,
        /// Threshold exceeded.
        threshold: f64,
    },
}

impl SystemWarning {
    /// System warnings are informational only.
    pub fn is_critical(&self) -> bool {
        false
    }

    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            SystemWarning::CpuGovernorNotPerformance { current } => format!(
                "CPU frequency governor is '{}'; tail numbers include frequency ramp-up. \
                 Set with: sudo cpupower frequency-set -g performance",
                current
            ),
            SystemWarning::TurboBoostEnabled => {
                "Turbo boost is enabled; expect run-to-run drift in the median.".to_string()
            }
            SystemWarning::TransparentHugepagesAlways => {
                "Transparent hugepages are set to 'always'; background compaction can add \
                 stalls unrelated to the workload."
                    .to_string()
            }
            SystemWarning::VirtualMachineDetected => {
                "Running in a virtual machine; page faults and syscalls may exit to the \
                 hypervisor and inflate the tail."
                    .to_string()
            }
            SystemWarning::HighSystemLoad {
                load_average,
                threshold,
            } => format!(
                "Load average {:.2} exceeds {:.2}; preemption will show up as tail spikes.",
                load_average, threshold
            ),
        }
    }
}

impl std::fmt::Display for SystemWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description())
    }
}

/// One-minute load average above which a warning is raised.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
const LOAD_THRESHOLD: f64 = 1.0;

/// Run all host checks available on this platform.
pub fn system_check() -> Vec<SystemWarning> {
    #[cfg(target_os = "linux")]
    {
        [
            linux::governor(),
            linux::turbo(),
            linux::transparent_hugepages(),
            linux::hypervisor(),
            linux::load(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    #[cfg(not(target_os = "linux"))]
    {
        Vec::new()
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use super::{SystemWarning, LOAD_THRESHOLD};
    use std::fs;

    fn read_trimmed(path: &str) -> Option<String> {
        fs::read_to_string(path).ok().map(|s| s.trim().to_string())
    }

    pub(super) fn governor() -> Option<SystemWarning> {
        let current = read_trimmed("/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor")?
            .to_lowercase();
        (current != "performance").then_some(SystemWarning::CpuGovernorNotPerformance { current })
    }

    pub(super) fn turbo() -> Option<SystemWarning> {
        if let Some(no_turbo) = read_trimmed("/sys/devices/system/cpu/intel_pstate/no_turbo") {
            return (no_turbo == "0").then_some(SystemWarning::TurboBoostEnabled);
        }
        let boost = read_trimmed("/sys/devices/system/cpu/cpufreq/boost")?;
        (boost == "1").then_some(SystemWarning::TurboBoostEnabled)
    }

    pub(super) fn transparent_hugepages() -> Option<SystemWarning> {
        let setting = read_trimmed("/sys/kernel/mm/transparent_hugepage/enabled")?;
        parse_thp_always(&setting).then_some(SystemWarning::TransparentHugepagesAlways)
    }

    pub(super) fn hypervisor() -> Option<SystemWarning> {
        let cpuinfo = fs::read_to_string("/proc/cpuinfo").ok()?;
        cpuinfo
            .lines()
            .any(|line| line.starts_with("flags") && line.split_whitespace().any(|f| f == "hypervisor"))
            .then_some(SystemWarning::VirtualMachineDetected)
    }

    pub(super) fn load() -> Option<SystemWarning> {
        let load_average = parse_loadavg(&fs::read_to_string("/proc/loadavg").ok()?)?;
        (load_average > LOAD_THRESHOLD).then_some(SystemWarning::HighSystemLoad {
            load_average,
            threshold: LOAD_THRESHOLD,
        })
    }

    /// `always [madvise] never` style: the bracketed entry is active.
    pub(super) fn parse_thp_always(setting: &str) -> bool {
        setting.split_whitespace().any(|s| s == "[always]")
    }

    pub(super) fn parse_loadavg(contents: &str) -> Option<f64> {
        contents.split_whitespace().next()?.parse().ok()
    }
}
