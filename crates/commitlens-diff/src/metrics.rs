//! Quantitative signals derived from a parsed diff.
//!
//! A pure, total function over `(Diff, raw message)`: totals, doc/source
//! classification, and rename pairs the message never acknowledges.

use commitlens_core::vocab;

use crate::parser::Diff;

/// A file that moved between two paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePair {
    /// Path in the old version.
    pub from: String,
    /// Path in the new version.
    pub to: String,
}

/// Signals the heuristic checks consume.
///
/// File lists preserve diff order; binaries count as touched but are
/// neither documentation nor source.
///
/// # Examples
///
/// ```
/// use commitlens_diff::metrics::{extract, FileClassifier};
/// use commitlens_diff::parser::parse;
///
/// let diff = parse(
///     "diff --git a/README.md b/README.md\n\
///      --- a/README.md\n\
///      +++ b/README.md\n\
///      @@ -1 +1,2 @@\n\
///      \u{20}intro\n\
///      +more\n",
/// );
/// let metrics = extract(&diff, "docs: expand readme", &FileClassifier::default());
/// assert_eq!(metrics.total_added, 1);
/// assert_eq!(metrics.doc_files_touched(), 1);
/// assert_eq!(metrics.source_files_touched(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Lines added across all files.
    pub total_added: u32,
    /// Lines removed across all files.
    pub total_removed: u32,
    /// Every touched path, in diff order.
    pub paths: Vec<String>,
    /// Touched paths classified as documentation.
    pub doc_files: Vec<String>,
    /// Touched paths classified as source (everything else non-binary).
    pub source_files: Vec<String>,
    /// All rename pairs in the diff.
    pub renames: Vec<RenamePair>,
    /// Rename pairs whose old and new basenames both go unmentioned in the
    /// message.
    pub unreported_renames: Vec<RenamePair>,
}

impl Metrics {
    /// Total changed lines, added plus removed.
    pub fn total_changed(&self) -> u32 {
        self.total_added + self.total_removed
    }

    /// Number of files touched, binaries included.
    pub fn files_touched(&self) -> usize {
        self.paths.len()
    }

    /// Number of documentation files touched.
    pub fn doc_files_touched(&self) -> usize {
        self.doc_files.len()
    }

    /// Number of source files touched.
    pub fn source_files_touched(&self) -> usize {
        self.source_files.len()
    }
}

/// Classifies paths as documentation or source using the doc-path glob
/// vocabulary, optionally extended from configuration.
///
/// Invalid extension patterns are ignored rather than rejected, so a bad
/// config line cannot take the whole analysis down.
///
/// # Examples
///
/// ```
/// use commitlens_diff::metrics::FileClassifier;
///
/// let classifier = FileClassifier::default();
/// assert!(classifier.is_doc("README.md"));
/// assert!(classifier.is_doc("docs/guide.adoc"));
/// assert!(!classifier.is_doc("src/main.rs"));
/// ```
pub struct FileClassifier {
    patterns: Vec<glob::Pattern>,
}

impl FileClassifier {
    /// Build a classifier from the built-in vocabulary plus extra patterns.
    pub fn new(extra_patterns: &[String]) -> Self {
        let mut patterns = Vec::new();
        for pat in vocab::DOC_PATH_PATTERNS {
            if let Ok(p) = glob::Pattern::new(pat) {
                patterns.push(p);
            }
        }
        for pat in extra_patterns {
            if let Ok(p) = glob::Pattern::new(pat) {
                patterns.push(p);
            }
        }
        Self { patterns }
    }

    /// True when the path matches any documentation pattern.
    pub fn is_doc(&self, path: &str) -> bool {
        let options = glob::MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.patterns.iter().any(|p| p.matches_with(path, options))
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(&[])
    }
}

/// Derive [`Metrics`] from a parsed diff and the raw commit message.
///
/// The message is only consulted for rename reporting: a rename counts as
/// unreported when neither its old nor its new basename occurs, case
/// insensitively, as a literal substring of the message.
pub fn extract(diff: &Diff, message_raw: &str, classifier: &FileClassifier) -> Metrics {
    let raw_lower = message_raw.to_lowercase();
    let mut metrics = Metrics::default();

    for file in diff.files() {
        let path = file.path().to_string();
        metrics.total_added += file.lines_added;
        metrics.total_removed += file.lines_removed;

        if !file.is_binary {
            if classifier.is_doc(&path) {
                metrics.doc_files.push(path.clone());
            } else {
                metrics.source_files.push(path.clone());
            }
        }

        if file.is_rename() {
            // is_rename guarantees both sides are present
            let pair = RenamePair {
                from: file.path_before.clone().unwrap_or_default(),
                to: file.path_after.clone().unwrap_or_default(),
            };
            if !basename_mentioned(&raw_lower, &pair.from)
                && !basename_mentioned(&raw_lower, &pair.to)
            {
                metrics.unreported_renames.push(pair.clone());
            }
            metrics.renames.push(pair);
        }

        metrics.paths.push(path);
    }

    metrics
}

fn basename_mentioned(raw_lower: &str, path: &str) -> bool {
    let base = path.rsplit('/').next().unwrap_or(path);
    !base.is_empty() && raw_lower.contains(&base.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn classifier() -> FileClassifier {
        FileClassifier::default()
    }

    #[test]
    fn empty_diff_yields_zero_metrics() {
        let metrics = extract(&Diff::default(), "whatever", &classifier());
        assert_eq!(metrics.total_changed(), 0);
        assert_eq!(metrics.files_touched(), 0);
        assert!(metrics.renames.is_empty());
    }

    #[test]
    fn totals_sum_across_files() {
        let diff = parse(
            "\
diff --git a/a.rs b/a.rs
--- a/a.rs
+++ b/a.rs
@@ -1,2 +1,3 @@
 keep
-old
+new
+extra
diff --git a/b.rs b/b.rs
--- a/b.rs
+++ b/b.rs
@@ -1,2 +1,1 @@
-gone
 keep
",
        );
        let metrics = extract(&diff, "update things", &classifier());
        assert_eq!(metrics.total_added, 2);
        assert_eq!(metrics.total_removed, 2);
        assert_eq!(metrics.total_changed(), 4);
        assert_eq!(metrics.files_touched(), 2);
        assert_eq!(metrics.paths, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn doc_and_source_classification() {
        let diff = parse(
            "\
diff --git a/README.md b/README.md
--- a/README.md
+++ b/README.md
@@ -1 +1,2 @@
 intro
+more
diff --git a/docs/guide.txt b/docs/guide.txt
--- a/docs/guide.txt
+++ b/docs/guide.txt
@@ -1 +1,2 @@
 intro
+more
diff --git a/tool.py b/tool.py
--- a/tool.py
+++ b/tool.py
@@ -1 +1,2 @@
 pass
+pass
",
        );
        let metrics = extract(&diff, "docs: update", &classifier());
        assert_eq!(metrics.doc_files_touched(), 2);
        assert_eq!(metrics.source_files_touched(), 1);
        assert_eq!(metrics.source_files, vec!["tool.py"]);
    }

    #[test]
    fn binary_is_neither_doc_nor_source_but_still_touched() {
        let diff = parse(
            "\
diff --git a/logo.png b/logo.png
Binary files a/logo.png and b/logo.png differ
",
        );
        let metrics = extract(&diff, "add logo", &classifier());
        assert_eq!(metrics.files_touched(), 1);
        assert_eq!(metrics.doc_files_touched(), 0);
        assert_eq!(metrics.source_files_touched(), 0);
    }

    #[test]
    fn mentioned_rename_is_reported() {
        let diff = parse(
            "\
diff --git a/src/util.rs b/src/helpers.rs
similarity index 100%
rename from src/util.rs
rename to src/helpers.rs
",
        );
        let metrics = extract(&diff, "split helpers.rs out of util", &classifier());
        assert_eq!(metrics.renames.len(), 1);
        assert!(metrics.unreported_renames.is_empty());
    }

    #[test]
    fn unmentioned_rename_is_unreported() {
        let diff = parse(
            "\
diff --git a/src/util.rs b/src/helpers.rs
similarity index 100%
rename from src/util.rs
rename to src/helpers.rs
",
        );
        let metrics = extract(&diff, "general cleanup", &classifier());
        assert_eq!(metrics.renames.len(), 1);
        assert_eq!(metrics.unreported_renames.len(), 1);
        assert_eq!(metrics.unreported_renames[0].from, "src/util.rs");
        assert_eq!(metrics.unreported_renames[0].to, "src/helpers.rs");
    }

    #[test]
    fn basename_match_is_case_insensitive() {
        let diff = parse(
            "\
diff --git a/Setup.cfg b/setup.cfg
similarity index 100%
rename from Setup.cfg
rename to setup.cfg
",
        );
        let metrics = extract(&diff, "Lowercase SETUP.CFG", &classifier());
        assert!(metrics.unreported_renames.is_empty());
    }

    #[test]
    fn extra_doc_patterns_extend_the_vocabulary() {
        let with_extra = FileClassifier::new(&["man/*".to_string()]);
        assert!(with_extra.is_doc("man/commitlens.1"));
        assert!(!classifier().is_doc("man/commitlens.1"));
    }

    #[test]
    fn invalid_extra_pattern_is_ignored() {
        let with_bad = FileClassifier::new(&["[".to_string()]);
        assert!(with_bad.is_doc("README.md"));
        assert!(!with_bad.is_doc("src/lib.rs"));
    }
}
