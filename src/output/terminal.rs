//! Terminal output formatting.

use colored::Colorize;

use crate::preflight::PreflightWarnings;
use crate::statistics::Stats;

/// Format the seven-line latency report.
///
/// Values are nanoseconds; only `avg` carries decimals. Labels are padded
/// so values line up, matching the layout downstream scripts parse.
pub fn format_stats(stats: &Stats) -> String {
    format!(
        "min:  {}\navg:  {:.2}\np50:  {}\np90:  {}\np99:  {}\np99.9:{}\nmax:  {}\n",
        stats.min, stats.avg, stats.p50, stats.p90, stats.p99, stats.p999, stats.max
    )
}

/// Format warnings for stderr, one per line. Empty when there are none.
///
/// A closing note is added when any warning is critical.
pub fn format_warnings(warnings: &PreflightWarnings) -> String {
    let mut output = String::new();
    for warning in &warnings.system {
        output.push_str(&format!("{} {}\n", "warning:".yellow().bold(), warning));
    }
    for warning in &warnings.resolution {
        let label = if warning.is_critical() {
            "error:".red().bold()
        } else {
            "warning:".yellow().bold()
        };
        output.push_str(&format!("{} {}\n", label, warning));
    }
    if warnings.has_critical() {
        output.push_str(&format!(
            "{} percentiles below reflect clock quantization, not the workload\n",
            "note:".bold()
        ));
    }
    output
}

/// Format mean latency per page-fault cycle.
///
/// The first line is the cold pass; later lines should collapse toward
/// the baseline once pages are resident.
pub fn format_page_cycles(means: &[f64]) -> String {
    let mut output = String::new();
    for (cycle, mean) in means.iter().enumerate() {
        let line = format!("cycle {:>3}: {:.2} ns\n", cycle, mean);
        if cycle == 0 {
            output.push_str(&line.bold().to_string());
        } else {
            output.push_str(&line);
        }
    }
    output
}
