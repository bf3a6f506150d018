//! Message analysis, heuristic checks, and report aggregation.
//!
//! The whole pipeline is exposed as [`report::audit`]: a deterministic,
//! total function from `(diff text, message text, config)` to a
//! [`report::Report`]. The pipeline performs no I/O and never fails;
//! everything that could go wrong upstream degrades to fewer findings.

pub mod checks;
pub mod message;
pub mod report;

pub use report::{audit, Report};
