//! The terminal, always-succeeding stage: run the whole pipeline and
//! aggregate findings into an immutable [`Report`].

use std::fmt;

use commitlens_core::{Finding, LensConfig, Verdict};
use commitlens_diff::metrics::{self, FileClassifier};
use commitlens_diff::parser;
use serde::Serialize;

use crate::checks;
use crate::message::CommitMessage;

/// Summary statistics for one audited commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    /// Number of files touched, binaries included.
    pub files_touched: usize,
    /// Lines added across all files.
    pub lines_added: u32,
    /// Lines removed across all files.
    pub lines_removed: u32,
    /// Number of rename pairs in the diff.
    pub renames: usize,
}

/// The complete result of auditing one `(diff, message)` pair.
///
/// Immutable once produced; findings are ordered by check evaluation order.
/// `degraded` is set when diff text was present but none of it parsed, so
/// renderers can say so instead of implying a clean empty diff.
///
/// # Examples
///
/// ```
/// use commitlens_audit::report::audit;
/// use commitlens_core::{LensConfig, Verdict};
///
/// let report = audit("", "", &LensConfig::default());
/// assert_eq!(report.verdict, Verdict::Consistent);
/// assert!(report.findings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The message's first line, for display.
    pub subject: String,
    /// Overall advisory verdict.
    pub verdict: Verdict,
    /// Diff text was present but could not be parsed at all.
    pub degraded: bool,
    /// Summary statistics.
    pub stats: AuditStats,
    /// Findings in check evaluation order.
    pub findings: Vec<Finding>,
}

/// Audit one commit: parse the diff, analyze the message, extract metrics,
/// run all five checks, aggregate.
///
/// This function is deterministic and total. It performs no I/O, holds no
/// state across calls, and never fails: malformed diff text degrades to an
/// empty diff, and the result is a report, not an error.
///
/// # Examples
///
/// ```
/// use commitlens_audit::report::audit;
/// use commitlens_core::{LensConfig, Verdict};
///
/// let diff = "diff --git a/big.rs b/big.rs\n\
///             --- a/big.rs\n\
///             +++ b/big.rs\n\
///             @@ -0,0 +1,2 @@\n\
///             +line\n\
///             +line\n";
/// let report = audit(diff, "fix typo", &LensConfig::default());
/// // two changed lines is well under the size threshold
/// assert_eq!(report.verdict, Verdict::Consistent);
/// ```
pub fn audit(diff_text: &str, message_text: &str, config: &LensConfig) -> Report {
    let diff = parser::parse(diff_text);
    let message = CommitMessage::parse_with(message_text, &config.vocab.extra_rename_tokens);
    let classifier = FileClassifier::new(&config.vocab.extra_doc_patterns);
    let metrics = metrics::extract(&diff, &message.raw, &classifier);
    let findings = checks::run_all(&message, &metrics, &config.checks, &config.vocab);

    let verdict = if findings.is_empty() {
        Verdict::Consistent
    } else {
        Verdict::Inconsistent
    };
    let degraded = diff.is_empty() && !diff_text.trim().is_empty();

    Report {
        subject: message.summary.clone(),
        verdict,
        degraded,
        stats: AuditStats {
            files_touched: metrics.files_touched(),
            lines_added: metrics.total_added,
            lines_removed: metrics.total_removed,
            renames: metrics.renames.len(),
        },
        findings,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  {}", self.verdict, self.subject)?;
        write!(
            f,
            "  +{}/-{} in {} file(s)",
            self.stats.lines_added, self.stats.lines_removed, self.stats.files_touched
        )?;
        if self.stats.renames > 0 {
            write!(f, ", {} rename(s)", self.stats.renames)?;
        }
        writeln!(f)?;

        if self.degraded {
            writeln!(f, "  note: diff text could not be parsed; nothing measurable")?;
        }

        for finding in &self.findings {
            writeln!(
                f,
                "  [{}] {}: {}",
                finding.severity, finding.check, finding.explanation
            )?;
        }
        Ok(())
    }
}

impl Report {
    /// Render the report as a markdown string.
    ///
    /// # Examples
    ///
    /// ```
    /// use commitlens_audit::report::audit;
    /// use commitlens_core::LensConfig;
    ///
    /// let report = audit("", "fix typo", &LensConfig::default());
    /// let md = report.to_markdown();
    /// assert!(md.contains("# Commit Audit"));
    /// ```
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Commit Audit\n\n");
        out.push_str(&format!("**Subject:** {}\n\n", self.subject));
        out.push_str(&format!("**Verdict:** {}\n\n", self.verdict));
        out.push_str(&format!(
            "**Changes:** +{}/-{} in {} file(s), {} rename(s)\n\n",
            self.stats.lines_added,
            self.stats.lines_removed,
            self.stats.files_touched,
            self.stats.renames,
        ));

        if self.degraded {
            out.push_str("> Diff text could not be parsed; nothing measurable.\n\n");
        }

        if !self.findings.is_empty() {
            out.push_str("| Check | Severity | Explanation |\n");
            out.push_str("|-------|----------|-------------|\n");
            for finding in &self.findings {
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    finding.check, finding.severity, finding.explanation
                ));
            }
            out.push('\n');
        }

        out
    }
}
