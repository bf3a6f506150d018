use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a single finding.
///
/// The verdict does not depend on severity: any finding at all makes a
/// commit inconsistent. Severity only tells the reader how much weight the
/// check itself carries.
///
/// # Examples
///
/// ```
/// use commitlens_core::Severity;
///
/// let s: Severity = serde_json::from_str("\"warn\"").unwrap();
/// assert_eq!(s, Severity::Warn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational observation from a supplemental rule.
    Info,
    /// A likely mismatch between message and diff.
    Warn,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
        }
    }
}

/// Identifier of one of the five heuristic checks.
///
/// The set is fixed and the evaluation order is the declaration order here;
/// findings always appear in this order.
///
/// # Examples
///
/// ```
/// use commitlens_core::CheckId;
///
/// assert_eq!(CheckId::SizeMismatch.to_string(), "size_mismatch");
/// let id: CheckId = serde_json::from_str("\"empty_diff\"").unwrap();
/// assert_eq!(id, CheckId::EmptyDiff);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    /// Message implies a small change but the diff is large.
    SizeMismatch,
    /// Message implies adding but the diff mostly removes, or vice versa.
    DirectionMismatch,
    /// Message claims documentation but source files changed.
    ScopeMismatch,
    /// Renames in the diff that the message never mentions.
    RenameMismatch,
    /// Message describes a change but the diff contains no files.
    EmptyDiff,
}

impl CheckId {
    /// Stable snake_case name, matching the JSON encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckId::SizeMismatch => "size_mismatch",
            CheckId::DirectionMismatch => "direction_mismatch",
            CheckId::ScopeMismatch => "scope_mismatch",
            CheckId::RenameMismatch => "rename_mismatch",
            CheckId::EmptyDiff => "empty_diff",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One heuristic's output: which check fired, how seriously, and why.
///
/// Explanations reference concrete numbers from the diff so a reader can
/// verify the claim without re-running the tool.
///
/// # Examples
///
/// ```
/// use commitlens_core::{CheckId, Finding, Severity};
///
/// let finding = Finding {
///     check: CheckId::SizeMismatch,
///     severity: Severity::Warn,
///     explanation: "message says \"typo\" but the diff changes 400 lines".into(),
/// };
/// let json = serde_json::to_value(&finding).unwrap();
/// assert_eq!(json["check"], "size_mismatch");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Which check produced this finding.
    pub check: CheckId,
    /// How seriously to take it.
    pub severity: Severity,
    /// Human-readable explanation with the numbers behind it.
    pub explanation: String,
}

/// Overall advisory verdict for one commit.
///
/// Advisory means exactly that: the verdict informs, it never gates. The
/// exit-code mapping is informational by contract.
///
/// # Examples
///
/// ```
/// use commitlens_core::Verdict;
///
/// assert_eq!(Verdict::Consistent.exit_code(), 0);
/// assert_eq!(Verdict::Inconsistent.exit_code(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No findings: the message is consistent with the diff.
    Consistent,
    /// At least one finding.
    Inconsistent,
}

impl Verdict {
    /// Informational process exit code: 0 when consistent, 1 when findings
    /// exist. Never to be read as "commit rejected".
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Consistent => 0,
            Verdict::Inconsistent => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Consistent => write!(f, "consistent"),
            Verdict::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// What the message's leading verb claims the commit does.
///
/// # Examples
///
/// ```
/// use commitlens_core::ActionClass;
///
/// assert_eq!(ActionClass::Addition.to_string(), "addition");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionClass {
    /// Leading verb from the addition vocabulary ("add", "implement", ...).
    Addition,
    /// Leading verb from the removal vocabulary ("remove", "delete", ...).
    Removal,
    /// Leading verb from the modification vocabulary ("fix", "update", ...).
    Modification,
    /// No vocabulary match.
    Unclear,
}

impl fmt::Display for ActionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionClass::Addition => write!(f, "addition"),
            ActionClass::Removal => write!(f, "removal"),
            ActionClass::Modification => write!(f, "modification"),
            ActionClass::Unclear => write!(f, "unclear"),
        }
    }
}

/// Conventional-commit type prefix declared by the message.
///
/// Messages without a recognized `type:` prefix simply have none; that is
/// valid, not an error.
///
/// # Examples
///
/// ```
/// use commitlens_core::CommitKind;
///
/// let kind: CommitKind = "docs".parse().unwrap();
/// assert_eq!(kind, CommitKind::Docs);
/// assert!("wip".parse::<CommitKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKind {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl fmt::Display for CommitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommitKind::Feat => "feat",
            CommitKind::Fix => "fix",
            CommitKind::Docs => "docs",
            CommitKind::Style => "style",
            CommitKind::Refactor => "refactor",
            CommitKind::Perf => "perf",
            CommitKind::Test => "test",
            CommitKind::Build => "build",
            CommitKind::Ci => "ci",
            CommitKind::Chore => "chore",
            CommitKind::Revert => "revert",
        };
        f.write_str(name)
    }
}

impl FromStr for CommitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(CommitKind::Feat),
            "fix" => Ok(CommitKind::Fix),
            "docs" => Ok(CommitKind::Docs),
            "style" => Ok(CommitKind::Style),
            "refactor" => Ok(CommitKind::Refactor),
            "perf" => Ok(CommitKind::Perf),
            "test" => Ok(CommitKind::Test),
            "build" => Ok(CommitKind::Build),
            "ci" => Ok(CommitKind::Ci),
            "chore" => Ok(CommitKind::Chore),
            "revert" => Ok(CommitKind::Revert),
            other => Err(format!("unknown commit type: {other}")),
        }
    }
}

/// Output format for CLI subcommands.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing.
///
/// # Examples
///
/// ```
/// use commitlens_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report (default).
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown-formatted report.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
