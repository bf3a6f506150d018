use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LensError;

/// Top-level configuration loaded from `.commitlens.toml`.
///
/// Every field has a default, so a missing or empty file behaves exactly
/// like the built-in thresholds.
///
/// # Examples
///
/// ```
/// use commitlens_core::LensConfig;
///
/// let config = LensConfig::default();
/// assert_eq!(config.checks.small_change_max_lines, 50);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LensConfig {
    /// Heuristic thresholds.
    #[serde(default)]
    pub checks: CheckConfig,
    /// Vocabulary extensions.
    #[serde(default)]
    pub vocab: VocabConfig,
    /// `log` subcommand behavior.
    #[serde(default)]
    pub log: LogConfig,
}

impl LensConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Io`] if the file cannot be read, or
    /// [`LensError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use commitlens_core::LensConfig;
    /// use std::path::Path;
    ///
    /// let config = LensConfig::from_file(Path::new(".commitlens.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, LensError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use commitlens_core::LensConfig;
    ///
    /// let toml = r#"
    /// [checks]
    /// small_change_max_lines = 30
    /// "#;
    /// let config = LensConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.checks.small_change_max_lines, 30);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, LensError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Numeric thresholds for the heuristic checks.
///
/// These are plain parameters handed to the engine; the defaults are
/// working values, not confirmed constants, so every one is overridable.
///
/// # Examples
///
/// ```
/// use commitlens_core::CheckConfig;
///
/// let config = CheckConfig::default();
/// assert_eq!(config.small_change_max_lines, 50);
/// assert_eq!(config.direction_dominance, 0.8);
/// assert_eq!(config.direction_noise_floor, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Changed lines a "typo"-class message may plausibly cover (default: 50).
    #[serde(default = "default_small_change_max_lines")]
    pub small_change_max_lines: u32,
    /// Share of changed lines going the wrong way before the direction
    /// check fires (default: 0.8).
    #[serde(default = "default_direction_dominance")]
    pub direction_dominance: f64,
    /// Minimum changed lines before the direction check applies at all
    /// (default: 10).
    #[serde(default = "default_direction_noise_floor")]
    pub direction_noise_floor: u32,
    /// Changed lines above which a terse message is flagged (default: 200).
    #[serde(default = "default_large_diff_lines")]
    pub large_diff_lines: u32,
    /// Subject word count below which a message counts as terse (default: 4).
    #[serde(default = "default_short_message_words")]
    pub short_message_words: usize,
}

fn default_small_change_max_lines() -> u32 {
    50
}

fn default_direction_dominance() -> f64 {
    0.8
}

fn default_direction_noise_floor() -> u32 {
    10
}

fn default_large_diff_lines() -> u32 {
    200
}

fn default_short_message_words() -> usize {
    4
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            small_change_max_lines: default_small_change_max_lines(),
            direction_dominance: default_direction_dominance(),
            direction_noise_floor: default_direction_noise_floor(),
            large_diff_lines: default_large_diff_lines(),
            short_message_words: default_short_message_words(),
        }
    }
}

/// Extensions to the built-in vocabularies in [`crate::vocab`].
///
/// Extensions add words; the built-in tables always apply.
///
/// # Examples
///
/// ```
/// use commitlens_core::VocabConfig;
///
/// let config = VocabConfig::default();
/// assert!(config.extra_small_words.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabConfig {
    /// Additional small-change words for the size check.
    #[serde(default)]
    pub extra_small_words: Vec<String>,
    /// Additional rename-indicating tokens.
    #[serde(default)]
    pub extra_rename_tokens: Vec<String>,
    /// Additional glob patterns classifying paths as documentation.
    #[serde(default)]
    pub extra_doc_patterns: Vec<String>,
}

/// Behavior of the `log` subcommand.
///
/// # Examples
///
/// ```
/// use commitlens_core::LogConfig;
///
/// assert_eq!(LogConfig::default().limit, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// How many recent commits to audit (default: 10).
    #[serde(default = "default_log_limit")]
    pub limit: usize,
}

fn default_log_limit() -> usize {
    10
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            limit: default_log_limit(),
        }
    }
}
