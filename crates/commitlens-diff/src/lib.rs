//! Unified-diff parsing and metric extraction.
//!
//! [`parser`] turns raw diff text into a structured, immutable [`parser::Diff`];
//! [`metrics`] derives the quantitative signals the heuristic checks consume.
//! Both stages are total: malformed input degrades to an empty or reduced
//! diff, it never errors.

pub mod metrics;
pub mod parser;
