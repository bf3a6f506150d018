//! Core types, configuration, and error handling for commitlens.
//!
//! This crate provides the shared foundation used by the other commitlens
//! crates:
//! - [`LensError`] — unified error type using `thiserror`
//! - [`LensConfig`] — configuration loaded from `.commitlens.toml`
//! - Shared types: [`Severity`], [`CheckId`], [`Finding`], [`Verdict`],
//!   [`ActionClass`], [`CommitKind`], [`OutputFormat`]
//! - [`vocab`] — the fixed vocabularies as plain data tables

mod config;
mod error;
mod types;
pub mod vocab;

pub use config::{CheckConfig, LensConfig, LogConfig, VocabConfig};
pub use error::LensError;
pub use types::{ActionClass, CheckId, CommitKind, Finding, OutputFormat, Severity, Verdict};

/// A convenience `Result` type for commitlens operations.
pub type Result<T> = std::result::Result<T, LensError>;
