use std::path::PathBuf;

/// Errors that can occur across the commitlens tool.
///
/// Each variant wraps a specific failure domain. Library crates use this type
/// directly; the binary crate converts to diagnostics at the boundary.
///
/// There is deliberately no variant for diff parsing: a diff that cannot be
/// parsed is a data state (an empty diff), never an error.
///
/// # Examples
///
/// ```
/// use commitlens_core::LensError;
///
/// let err = LensError::Config("missing threshold".into());
/// assert!(err.to_string().contains("missing threshold"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum LensError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Git operation failure.
    #[error("git error: {0}")]
    Git(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
