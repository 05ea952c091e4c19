//! Structured extraction and normalization of text-generation output.
//!
//! Generator responses arrive as free-form text: fenced markdown blocks,
//! single-quoted pseudo-JSON, leading prose, or (rarely) clean JSON. This
//! crate turns that text into validated structured values without ever
//! failing the batch: extraction degrades to an empty value, normalization
//! degrades to `Unknown` parameter codes.

pub mod extract;
pub mod normalize;
mod relaxed;

pub use extract::{extract, ExpectedShape};
pub use normalize::{normalize, RecoveredParameters, UNKNOWN_HAZARD};
