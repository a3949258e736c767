//! Statistics derived from the failure log.
//!
//! - `reliability` - MTBF and MTTR per asset
//! - `pareto` - failure-mode frequency ranking

pub mod pareto;
pub mod reliability;

pub use pareto::{failure_mode_pareto, ParetoBucket};
pub use reliability::{
    calculate_mtbf_mttr, format_hours, summarize_logs, ReliabilitySummary, NOT_APPLICABLE,
};
