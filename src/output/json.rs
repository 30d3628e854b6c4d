//! JSON serialization for run reports.

use crate::result::Report;

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Report).
pub fn to_json(report: &Report<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Report).
pub fn to_json_pretty(report: &Report<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preflight::PreflightWarnings;
    use crate::result::{Metadata, Run};
    use crate::statistics::Stats;
    use crate::types::Mode;

    fn make_run() -> Run {
        let samples = vec![10, 20, 30, 40, 50];
        Run {
            mode: Mode::Pagefault,
            stats: Stats::compute(&samples),
            samples,
            sink: 0xdead_beef,
            page_cycle_means: Some(vec![30.0]),
            warnings: PreflightWarnings::new(),
            metadata: Metadata {
                warmup_iterations: 100,
                iterations: 5,
                pages: 5,
                timer: "monotonic".to_string(),
                timer_resolution_ns: 20.0,
                sampling_secs: 0.001,
            },
        }
    }

    #[test]
    fn test_to_json() {
        let run = make_run();
        let json = to_json(&run.report(false)).unwrap();
        assert!(json.contains("\"mode\":\"pagefault\""));
        assert!(json.contains("\"p999\":40"));
        assert!(json.contains("\"page_cycle_means\":[30.0]"));
        assert!(!json.contains("\"samples\""));
    }

    #[test]
    fn test_to_json_with_samples() {
        let run = make_run();
        let json = to_json(&run.report(true)).unwrap();
        assert!(json.contains("\"samples\":[10,20,30,40,50]"));
    }

    #[test]
    fn test_to_json_pretty() {
        let run = make_run();
        let json = to_json_pretty(&run.report(false)).unwrap();
        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["p50"], 30);
        assert_eq!(value["metadata"]["iterations"], 5);
    }
}
