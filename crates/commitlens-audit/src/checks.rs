//! The five heuristic checks.
//!
//! Each check is a total function from `(CommitMessage, Metrics)` to at most
//! one [`Finding`]. Checks never short-circuit each other: all five run on
//! every audit, in a fixed order, and a precondition that is not met simply
//! produces no finding. Thresholds arrive as plain numbers from
//! configuration; the word lists live in `commitlens_core::vocab`.

use commitlens_core::{
    vocab, ActionClass, CheckConfig, CheckId, CommitKind, Finding, Severity, VocabConfig,
};
use commitlens_diff::metrics::Metrics;

use crate::message::CommitMessage;

/// Run all five checks in their fixed order.
///
/// The result preserves evaluation order, so identical inputs always yield
/// an identically ordered finding list.
pub fn run_all(
    message: &CommitMessage,
    metrics: &Metrics,
    checks: &CheckConfig,
    vocab_cfg: &VocabConfig,
) -> Vec<Finding> {
    [
        size_mismatch(message, metrics, checks, vocab_cfg),
        direction_mismatch(message, metrics, checks),
        scope_mismatch(message, metrics),
        rename_mismatch(message, metrics),
        empty_diff(message, metrics),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Check 1: the subject implies a trivial change but the diff is large.
fn size_mismatch(
    message: &CommitMessage,
    metrics: &Metrics,
    checks: &CheckConfig,
    vocab_cfg: &VocabConfig,
) -> Option<Finding> {
    let total = metrics.total_changed();
    let files = metrics.files_touched();

    let small_word = vocab::SMALL_CHANGE_WORDS
        .iter()
        .copied()
        .chain(vocab_cfg.extra_small_words.iter().map(String::as_str))
        .find(|word| vocab::contains_word(&message.summary, word));

    if let Some(word) = small_word {
        if total > checks.small_change_max_lines {
            return Some(Finding {
                check: CheckId::SizeMismatch,
                severity: Severity::Warn,
                explanation: format!(
                    "message says \"{word}\" but the diff changes {total} lines across \
                     {files} file(s); expected at most {} lines",
                    checks.small_change_max_lines
                ),
            });
        }
    }

    let words = message.description.split_whitespace().count();
    if total > checks.large_diff_lines && words < checks.short_message_words {
        return Some(Finding {
            check: CheckId::SizeMismatch,
            severity: Severity::Info,
            explanation: format!(
                "large diff ({total} lines across {files} file(s)) but the message is \
                 only {words} word(s): \"{}\"",
                message.summary
            ),
        });
    }

    None
}

/// Check 2: the claimed direction contradicts where the lines went.
fn direction_mismatch(
    message: &CommitMessage,
    metrics: &Metrics,
    checks: &CheckConfig,
) -> Option<Finding> {
    let total = metrics.total_changed();
    if total < checks.direction_noise_floor {
        return None;
    }

    let added = metrics.total_added;
    let removed = metrics.total_removed;
    let removal_share = f64::from(removed) / f64::from(total);
    let addition_share = f64::from(added) / f64::from(total);

    match message.action {
        ActionClass::Addition if removal_share >= checks.direction_dominance => {
            return Some(Finding {
                check: CheckId::DirectionMismatch,
                severity: Severity::Warn,
                explanation: format!(
                    "message implies adding but {:.0}% of the {total} changed lines are \
                     removals (+{added}/-{removed})",
                    removal_share * 100.0
                ),
            });
        }
        ActionClass::Removal if addition_share >= checks.direction_dominance => {
            return Some(Finding {
                check: CheckId::DirectionMismatch,
                severity: Severity::Warn,
                explanation: format!(
                    "message implies removing but {:.0}% of the {total} changed lines are \
                     additions (+{added}/-{removed})",
                    addition_share * 100.0
                ),
            });
        }
        _ => {}
    }

    match message.prefix {
        Some(CommitKind::Feat) if removal_share >= checks.direction_dominance => Some(Finding {
            check: CheckId::DirectionMismatch,
            severity: Severity::Info,
            explanation: format!(
                "declared \"feat\" but the diff is {:.0}% removals (+{added}/-{removed}); \
                 features usually add code",
                removal_share * 100.0
            ),
        }),
        Some(CommitKind::Revert) if addition_share >= checks.direction_dominance => Some(Finding {
            check: CheckId::DirectionMismatch,
            severity: Severity::Info,
            explanation: format!(
                "declared \"revert\" but the diff is {:.0}% additions (+{added}/-{removed}); \
                 reverts usually remove code",
                addition_share * 100.0
            ),
        }),
        _ => None,
    }
}

/// Check 3: the message claims documentation but source files changed.
fn scope_mismatch(message: &CommitMessage, metrics: &Metrics) -> Option<Finding> {
    let claims_docs = message.prefix == Some(CommitKind::Docs)
        || vocab::DOC_KEYWORDS
            .iter()
            .any(|word| vocab::contains_word(&message.summary, word));

    if claims_docs && metrics.source_files_touched() > 0 {
        return Some(Finding {
            check: CheckId::ScopeMismatch,
            severity: Severity::Warn,
            explanation: format!(
                "message claims documentation but {} source file(s) changed: {}",
                metrics.source_files_touched(),
                sample(&metrics.source_files)
            ),
        });
    }

    if let Some(scope) = &message.scope {
        if metrics.files_touched() > 0 {
            let needle = scope.to_lowercase();
            let mentioned = metrics
                .paths
                .iter()
                .any(|path| path.to_lowercase().contains(&needle));
            if !mentioned {
                return Some(Finding {
                    check: CheckId::ScopeMismatch,
                    severity: Severity::Info,
                    explanation: format!(
                        "declared scope \"{scope}\" but none of the {} changed file \
                         path(s) mention it",
                        metrics.files_touched()
                    ),
                });
            }
        }
    }

    None
}

/// Check 4: renames the message never acknowledges, and the reverse.
fn rename_mismatch(message: &CommitMessage, metrics: &Metrics) -> Option<Finding> {
    if !metrics.unreported_renames.is_empty() && !message.mentions_rename {
        let shown: Vec<String> = metrics
            .unreported_renames
            .iter()
            .take(3)
            .map(|pair| format!("{} -> {}", pair.from, pair.to))
            .collect();
        let suffix = if metrics.unreported_renames.len() > 3 {
            ", ..."
        } else {
            ""
        };
        return Some(Finding {
            check: CheckId::RenameMismatch,
            severity: Severity::Warn,
            explanation: format!(
                "diff contains {} rename(s) not mentioned in the message: {}{suffix}",
                metrics.unreported_renames.len(),
                shown.join("; ")
            ),
        });
    }

    // the reverse direction needs a non-empty diff so that an empty diff
    // stays the empty-diff check's business alone
    if message.mentions_rename && metrics.renames.is_empty() && metrics.files_touched() > 0 {
        return Some(Finding {
            check: CheckId::RenameMismatch,
            severity: Severity::Info,
            explanation: format!(
                "message implies renaming or moving but none of the {} changed file(s) \
                 was renamed",
                metrics.files_touched()
            ),
        });
    }

    None
}

/// Check 5: the message describes a change, the diff contains nothing.
fn empty_diff(message: &CommitMessage, metrics: &Metrics) -> Option<Finding> {
    if metrics.files_touched() == 0 && !message.summary.is_empty() {
        return Some(Finding {
            check: CheckId::EmptyDiff,
            severity: Severity::Warn,
            explanation: "message describes a change but the diff contains no file changes"
                .to_string(),
        });
    }
    None
}

fn sample(paths: &[String]) -> String {
    let shown: Vec<&str> = paths.iter().take(3).map(String::as_str).collect();
    let suffix = if paths.len() > 3 { ", ..." } else { "" };
    format!("{}{suffix}", shown.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitlens_diff::metrics::RenamePair;

    fn defaults() -> (CheckConfig, VocabConfig) {
        (CheckConfig::default(), VocabConfig::default())
    }

    fn metrics_with_lines(added: u32, removed: u32, files: usize) -> Metrics {
        let paths: Vec<String> = (0..files).map(|i| format!("src/file{i}.rs")).collect();
        Metrics {
            total_added: added,
            total_removed: removed,
            source_files: paths.clone(),
            paths,
            ..Metrics::default()
        }
    }

    #[test]
    fn size_check_fires_above_threshold() {
        let (checks, vocab_cfg) = defaults();
        let msg = CommitMessage::parse("fix typo");
        let metrics = metrics_with_lines(220, 180, 3);
        let finding = size_mismatch(&msg, &metrics, &checks, &vocab_cfg).unwrap();
        assert_eq!(finding.check, CheckId::SizeMismatch);
        assert_eq!(finding.severity, Severity::Warn);
        assert!(finding.explanation.contains("400 lines"));
        assert!(finding.explanation.contains("3 file(s)"));
    }

    #[test]
    fn size_check_threshold_boundary() {
        let (checks, vocab_cfg) = defaults();
        let msg = CommitMessage::parse("fix typo");

        // exactly at the threshold: no finding
        let at = metrics_with_lines(25, 25, 1);
        assert!(size_mismatch(&msg, &at, &checks, &vocab_cfg).is_none());

        // one line over: finding
        let over = metrics_with_lines(26, 25, 1);
        assert!(size_mismatch(&msg, &over, &checks, &vocab_cfg).is_some());
    }

    #[test]
    fn size_check_is_monotonic_once_fired() {
        let (checks, vocab_cfg) = defaults();
        let msg = CommitMessage::parse("fix typo");
        for total in [51, 100, 500, 10_000] {
            let metrics = metrics_with_lines(total, 0, 2);
            assert!(
                size_mismatch(&msg, &metrics, &checks, &vocab_cfg).is_some(),
                "size check must keep firing at {total} lines"
            );
        }
    }

    #[test]
    fn large_diff_with_terse_message_is_informational() {
        let (checks, vocab_cfg) = defaults();
        let msg = CommitMessage::parse("stuff");
        let metrics = metrics_with_lines(150, 100, 8);
        let finding = size_mismatch(&msg, &metrics, &checks, &vocab_cfg).unwrap();
        assert_eq!(finding.severity, Severity::Info);
        assert!(finding.explanation.contains("250 lines"));
    }

    #[test]
    fn descriptive_large_diff_passes_size_check() {
        let (checks, vocab_cfg) = defaults();
        let msg = CommitMessage::parse("rework the scheduler queue handling end to end");
        let metrics = metrics_with_lines(150, 100, 8);
        assert!(size_mismatch(&msg, &metrics, &checks, &vocab_cfg).is_none());
    }

    #[test]
    fn direction_check_add_verb_dominated_by_removals() {
        let (checks, _) = defaults();
        let msg = CommitMessage::parse("add feature X");
        let metrics = metrics_with_lines(5, 45, 2);
        let finding = direction_mismatch(&msg, &metrics, &checks).unwrap();
        assert_eq!(finding.check, CheckId::DirectionMismatch);
        assert_eq!(finding.severity, Severity::Warn);
        assert!(finding.explanation.contains("90%"));
        assert!(finding.explanation.contains("+5/-45"));
    }

    #[test]
    fn direction_check_remove_verb_dominated_by_additions() {
        let (checks, _) = defaults();
        let msg = CommitMessage::parse("remove the legacy shim");
        let metrics = metrics_with_lines(90, 10, 2);
        let finding = direction_mismatch(&msg, &metrics, &checks).unwrap();
        assert!(finding.explanation.contains("additions"));
    }

    #[test]
    fn direction_check_respects_noise_floor() {
        let (checks, _) = defaults();
        let msg = CommitMessage::parse("add feature X");
        // 9 lines total, all removals: below the floor, no finding
        let metrics = metrics_with_lines(0, 9, 1);
        assert!(direction_mismatch(&msg, &metrics, &checks).is_none());

        // 10 lines total: at the floor, eligible
        let metrics = metrics_with_lines(0, 10, 1);
        assert!(direction_mismatch(&msg, &metrics, &checks).is_some());
    }

    #[test]
    fn direction_check_dominance_boundary() {
        let (checks, _) = defaults();
        let msg = CommitMessage::parse("add feature X");

        // exactly 80% removals: fires
        let metrics = metrics_with_lines(20, 80, 2);
        assert!(direction_mismatch(&msg, &metrics, &checks).is_some());

        // 79% removals: does not
        let metrics = metrics_with_lines(21, 79, 2);
        assert!(direction_mismatch(&msg, &metrics, &checks).is_none());
    }

    #[test]
    fn feat_prefix_dominated_by_removals_is_informational() {
        let (checks, _) = defaults();
        let msg = CommitMessage::parse("feat: streamline the importer");
        let metrics = metrics_with_lines(5, 95, 3);
        let finding = direction_mismatch(&msg, &metrics, &checks).unwrap();
        assert_eq!(finding.severity, Severity::Info);
        assert!(finding.explanation.contains("feat"));
    }

    #[test]
    fn revert_prefix_dominated_by_additions_is_informational() {
        let (checks, _) = defaults();
        let msg = CommitMessage::parse("revert: bring back the old parser");
        let metrics = metrics_with_lines(95, 5, 3);
        let finding = direction_mismatch(&msg, &metrics, &checks).unwrap();
        assert_eq!(finding.severity, Severity::Info);
        assert!(finding.explanation.contains("revert"));
    }

    #[test]
    fn scope_check_docs_prefix_with_source_files() {
        let msg = CommitMessage::parse("docs: update README");
        let metrics = Metrics {
            total_added: 10,
            total_removed: 2,
            paths: vec!["README.md".into(), "tool.py".into()],
            doc_files: vec!["README.md".into()],
            source_files: vec!["tool.py".into()],
            ..Metrics::default()
        };
        let finding = scope_mismatch(&msg, &metrics).unwrap();
        assert_eq!(finding.check, CheckId::ScopeMismatch);
        assert_eq!(finding.severity, Severity::Warn);
        assert!(finding.explanation.contains("tool.py"));
    }

    #[test]
    fn scope_check_doc_keyword_without_prefix() {
        let msg = CommitMessage::parse("update readme");
        let metrics = Metrics {
            paths: vec!["src/lib.rs".into()],
            source_files: vec!["src/lib.rs".into()],
            ..Metrics::default()
        };
        assert!(scope_mismatch(&msg, &metrics).is_some());
    }

    #[test]
    fn scope_check_pure_docs_diff_passes() {
        let msg = CommitMessage::parse("docs: update README");
        let metrics = Metrics {
            paths: vec!["README.md".into()],
            doc_files: vec!["README.md".into()],
            ..Metrics::default()
        };
        assert!(scope_mismatch(&msg, &metrics).is_none());
    }

    #[test]
    fn declared_scope_absent_from_paths_is_informational() {
        let msg = CommitMessage::parse("fix(auth): update token refresh");
        let metrics = Metrics {
            paths: vec!["src/billing/invoice.rs".into()],
            source_files: vec!["src/billing/invoice.rs".into()],
            ..Metrics::default()
        };
        let finding = scope_mismatch(&msg, &metrics).unwrap();
        assert_eq!(finding.severity, Severity::Info);
        assert!(finding.explanation.contains("auth"));
    }

    #[test]
    fn declared_scope_present_in_paths_passes() {
        let msg = CommitMessage::parse("fix(auth): update token refresh");
        let metrics = Metrics {
            paths: vec!["src/auth/token.rs".into()],
            source_files: vec!["src/auth/token.rs".into()],
            ..Metrics::default()
        };
        assert!(scope_mismatch(&msg, &metrics).is_none());
    }

    #[test]
    fn rename_check_unreported_renames() {
        let msg = CommitMessage::parse("general cleanup");
        let pair = RenamePair {
            from: "src/util.rs".into(),
            to: "src/helpers.rs".into(),
        };
        let metrics = Metrics {
            paths: vec!["src/helpers.rs".into()],
            source_files: vec!["src/helpers.rs".into()],
            renames: vec![pair.clone()],
            unreported_renames: vec![pair],
            ..Metrics::default()
        };
        let finding = rename_mismatch(&msg, &metrics).unwrap();
        assert_eq!(finding.severity, Severity::Warn);
        assert!(finding.explanation.contains("src/util.rs -> src/helpers.rs"));
    }

    #[test]
    fn rename_check_silenced_by_rename_vocabulary() {
        let msg = CommitMessage::parse("Restructure wiki: 10 flat sections to 6");
        let pair = RenamePair {
            from: "wiki/a.md".into(),
            to: "guides/a.md".into(),
        };
        let metrics = Metrics {
            paths: vec!["guides/a.md".into()],
            doc_files: vec!["guides/a.md".into()],
            renames: vec![pair.clone()],
            unreported_renames: vec![pair],
            ..Metrics::default()
        };
        assert!(rename_mismatch(&msg, &metrics).is_none());
    }

    #[test]
    fn rename_vocabulary_without_renames_is_informational() {
        let msg = CommitMessage::parse("move helpers into the core crate");
        let metrics = Metrics {
            total_added: 20,
            total_removed: 20,
            paths: vec!["src/core.rs".into()],
            source_files: vec!["src/core.rs".into()],
            ..Metrics::default()
        };
        let finding = rename_mismatch(&msg, &metrics).unwrap();
        assert_eq!(finding.severity, Severity::Info);
    }

    #[test]
    fn rename_vocabulary_with_empty_diff_stays_quiet() {
        let msg = CommitMessage::parse("move helpers into the core crate");
        let metrics = Metrics::default();
        assert!(rename_mismatch(&msg, &metrics).is_none());
    }

    #[test]
    fn empty_diff_check_needs_a_subject() {
        let metrics = Metrics::default();

        let msg = CommitMessage::parse("Minor cleanup");
        assert!(empty_diff(&msg, &metrics).is_some());

        let msg = CommitMessage::parse("");
        assert!(empty_diff(&msg, &metrics).is_none());

        let msg = CommitMessage::parse("   \n");
        assert!(empty_diff(&msg, &metrics).is_none());
    }

    #[test]
    fn all_checks_run_in_fixed_order() {
        let (checks, vocab_cfg) = defaults();
        // a message and diff engineered to trip size, direction, and scope
        let msg = CommitMessage::parse("add small docs tweak");
        let metrics = Metrics {
            total_added: 10,
            total_removed: 90,
            paths: vec!["src/a.rs".into(), "src/b.rs".into()],
            source_files: vec!["src/a.rs".into(), "src/b.rs".into()],
            ..Metrics::default()
        };
        let findings = run_all(&msg, &metrics, &checks, &vocab_cfg);
        let ids: Vec<CheckId> = findings.iter().map(|f| f.check).collect();
        assert_eq!(
            ids,
            vec![
                CheckId::SizeMismatch,
                CheckId::DirectionMismatch,
                CheckId::ScopeMismatch
            ]
        );
    }
}
