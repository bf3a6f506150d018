//! Fixed vocabularies, kept as plain data so thresholds and word lists can
//! be inspected and extended without touching check logic.
//!
//! All matching is exact-token and case-insensitive: "restructured" does not
//! match "restructure". Configuration may extend these tables, never replace
//! them.

/// Leading verbs that claim something was added.
pub const ADDITION_VERBS: &[&str] = &["add", "implement", "introduce", "create"];

/// Leading verbs that claim something was removed.
pub const REMOVAL_VERBS: &[&str] = &["remove", "delete", "drop"];

/// Leading verbs that claim an in-place change.
pub const MODIFICATION_VERBS: &[&str] = &["fix", "update", "refactor", "rename", "restructure"];

/// Words anywhere in the message that indicate renaming or moving files.
pub const RENAME_TOKENS: &[&str] = &["rename", "move", "restructure", "reorganize"];

/// Words in the subject that imply a trivially small change.
pub const SMALL_CHANGE_WORDS: &[&str] = &["typo", "minor", "small", "tiny", "whitespace", "comment"];

/// Words in the subject that claim a documentation-only change.
pub const DOC_KEYWORDS: &[&str] = &["readme", "docs", "documentation"];

/// Glob patterns classifying a path as documentation. Matched
/// case-insensitively, with `*` crossing directory separators.
pub const DOC_PATH_PATTERNS: &[&str] = &[
    "*.md",
    "*.rst",
    "*.txt",
    "*.adoc",
    "*readme*",
    "*changelog*",
    "*license*",
    "docs/*",
    "*/docs/*",
];

/// Whole-word, case-insensitive containment test.
///
/// Tokens are maximal runs of alphanumeric characters, so punctuation and
/// hyphenation act as word boundaries but inflected forms do not match.
///
/// # Examples
///
/// ```
/// use commitlens_core::vocab::contains_word;
///
/// assert!(contains_word("Fix typo in README", "typo"));
/// assert!(contains_word("Restructure the wiki", "restructure"));
/// assert!(!contains_word("Restructured the wiki", "restructure"));
/// assert!(!contains_word("smallest change ever", "small"));
/// ```
pub fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token.eq_ignore_ascii_case(word))
}
