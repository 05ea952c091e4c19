//! IEC 61508 style risk graph.
//!
//! The graph is a pure value: [`RiskGraph::build`] derives it once per
//! assessment run from injury statistics, and every [`RiskGraph::resolve`]
//! call reads it immutably. Replacing the statistics mid-run means building
//! a fresh graph and swapping it wholesale; there is no in-place rebuild,
//! so concurrent readers can never observe a half-built table.

mod error;
mod graph;

pub use error::RiskGraphError;
pub use graph::{RiskGraph, RiskGraphRow, HOURS_PER_YEAR};
