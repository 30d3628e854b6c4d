//! Report rendering.
//!
//! - [`terminal`]: the seven-line latency report plus stderr diagnostics
//! - [`json`]: machine-readable run reports

pub mod json;
pub mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_page_cycles, format_stats, format_warnings};
