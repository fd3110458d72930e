//! Query layer for the placement analytics engine.
//!
//! Two entry points: the criteria-to-query compiler ([`find_eligible`]),
//! which turns a sparse [`EligibilityCriteria`] into AND-combined
//! predicates over the joined per-student view, and the fixed catalogue of
//! aggregate insight queries ([`insights::run`]).

#![warn(clippy::all)]

pub mod criteria;
pub mod insights;
pub mod options;

mod join;
mod stats;

pub use criteria::{find_eligible, to_table, EligibilityCriteria, EligibleStudent};
pub use insights::{InsightQuery, DEFAULT_TOP_LIMIT};
pub use options::{filter_options, summary, FilterOptions, Summary};
