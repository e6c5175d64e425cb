//! Text reports over a loaded checkpoint.
//!
//! - [`trace`]: renders the physical route of a net, following it across
//!   site pins between the inside of sites and the general routing fabric.
//! - [`summary`]: placed-cell and routed-net counts.
//! - [`cell_report`]: per-cell placement, properties, pin mappings and routes.
//! - [`mappings`]: which bels each library cell can be placed on.

#![warn(missing_docs)]

pub mod cell_report;
pub mod mappings;
pub mod summary;
pub mod trace;

#[cfg(test)]
mod fixtures;

pub use cell_report::{CellReport, CellReportOptions, DesignReport};
pub use mappings::CellBelMappings;
pub use summary::DesignSummary;
pub use trace::{trace_net, Domain, RouteTrace, RouteTraceFormatter, TraceError, TraceOptions};
