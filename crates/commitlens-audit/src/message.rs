//! Commit message analysis: what does the message claim?

use commitlens_core::{vocab, ActionClass, CommitKind};
use serde::Serialize;

/// The claim surface extracted from a raw commit message.
///
/// # Examples
///
/// ```
/// use commitlens_audit::message::CommitMessage;
/// use commitlens_core::{ActionClass, CommitKind};
///
/// let msg = CommitMessage::parse("feat(parser)!: add strict hunk parsing");
/// assert_eq!(msg.prefix, Some(CommitKind::Feat));
/// assert_eq!(msg.scope.as_deref(), Some("parser"));
/// assert!(msg.breaking);
/// assert_eq!(msg.action, ActionClass::Addition);
/// assert!(!msg.mentions_rename);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMessage {
    /// Full message text.
    pub raw: String,
    /// First line, the primary claim.
    pub summary: String,
    /// Conventional-commit type, when the subject follows `type: subject`.
    pub prefix: Option<CommitKind>,
    /// Conventional-commit scope, when declared as `type(scope): subject`.
    pub scope: Option<String>,
    /// Breaking-change marker (`type!:`).
    pub breaking: bool,
    /// Subject with any conventional prefix stripped.
    pub description: String,
    /// What the leading verb claims the commit does.
    pub action: ActionClass,
    /// Whether the message contains rename/move vocabulary anywhere.
    pub mentions_rename: bool,
}

impl CommitMessage {
    /// Parse a raw message using the built-in vocabularies.
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, &[])
    }

    /// Parse a raw message, recognizing additional rename tokens from
    /// configuration on top of the built-in vocabulary.
    pub fn parse_with(raw: &str, extra_rename_tokens: &[String]) -> Self {
        let summary = raw.lines().next().unwrap_or("").trim().to_string();

        let (prefix, scope, breaking, description) = match parse_conventional(&summary) {
            Some((kind, scope, breaking, description)) => {
                (Some(kind), scope, breaking, description)
            }
            None => (None, None, false, summary.clone()),
        };

        let action = classify_action(&description);
        let mentions_rename = vocab::RENAME_TOKENS
            .iter()
            .copied()
            .chain(extra_rename_tokens.iter().map(String::as_str))
            .any(|token| vocab::contains_word(raw, token));

        Self {
            raw: raw.to_string(),
            summary,
            prefix,
            scope,
            breaking,
            description,
            action,
            mentions_rename,
        }
    }
}

/// Match the conventional `type(scope)!: subject` form. A subject that does
/// not follow the convention is simply not conventional; never an error.
fn parse_conventional(subject: &str) -> Option<(CommitKind, Option<String>, bool, String)> {
    let colon = subject.find(':')?;
    let head = subject[..colon].trim();
    let description = subject[colon + 1..].trim();
    if description.is_empty() {
        return None;
    }

    let (head, breaking) = match head.strip_suffix('!') {
        Some(stripped) => (stripped, true),
        None => (head, false),
    };

    let (kind_str, scope) = match head.find('(') {
        Some(open) => {
            if !head.ends_with(')') {
                return None;
            }
            let inner = &head[open + 1..head.len() - 1];
            if inner.is_empty() {
                return None;
            }
            (&head[..open], Some(inner.to_string()))
        }
        None => (head, None),
    };

    let kind: CommitKind = kind_str.parse().ok()?;
    Some((kind, scope, breaking, description.to_string()))
}

/// Classify the leading verb of the (prefix-stripped) subject. Exact token
/// match, no stemming: "adds" is not "add".
fn classify_action(description: &str) -> ActionClass {
    let Some(first) = description.split_whitespace().next() else {
        return ActionClass::Unclear;
    };
    let verb = first.trim_matches(|c: char| !c.is_alphanumeric());

    let matches_any = |table: &[&str]| table.iter().any(|v| verb.eq_ignore_ascii_case(v));

    if matches_any(vocab::ADDITION_VERBS) {
        ActionClass::Addition
    } else if matches_any(vocab::REMOVAL_VERBS) {
        ActionClass::Removal
    } else if matches_any(vocab::MODIFICATION_VERBS) {
        ActionClass::Modification
    } else {
        ActionClass::Unclear
    }
}
