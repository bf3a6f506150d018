use std::fmt;

/// One file's change record from a unified diff.
///
/// `path_before` is `None` for created files, `path_after` is `None` for
/// deleted files; both set and different means a rename, optionally with
/// content changes. Binary files count as touched but contribute zero line
/// counts.
///
/// # Examples
///
/// ```
/// use commitlens_diff::parser::parse;
///
/// let diff = "diff --git a/old_name.rs b/new_name.rs\n\
///             similarity index 100%\n\
///             rename from old_name.rs\n\
///             rename to new_name.rs\n";
/// let parsed = parse(diff);
/// assert!(parsed.files()[0].is_rename());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffFile {
    /// Path in the old version, if the file existed there.
    pub path_before: Option<String>,
    /// Path in the new version, if the file still exists.
    pub path_after: Option<String>,
    /// Lines added in this file.
    pub lines_added: u32,
    /// Lines removed in this file.
    pub lines_removed: u32,
    /// Binary file: touched, but line counts are meaningless.
    pub is_binary: bool,
}

impl DiffFile {
    /// True when the file moved: both paths known and different.
    pub fn is_rename(&self) -> bool {
        match (&self.path_before, &self.path_after) {
            (Some(before), Some(after)) => before != after,
            _ => false,
        }
    }

    /// The path to show for this file: the new path, falling back to the
    /// old one for deletions.
    pub fn path(&self) -> &str {
        self.path_after
            .as_deref()
            .or(self.path_before.as_deref())
            .unwrap_or("")
    }
}

impl fmt::Display for DiffFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (+{}/-{})",
            self.path(),
            self.lines_added,
            self.lines_removed
        )
    }
}

/// An ordered, immutable sequence of [`DiffFile`] entries.
///
/// Constructed once per analysis run by [`parse`]; file order is the diff's
/// own order and is the canonical iteration order everywhere downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    files: Vec<DiffFile>,
}

impl Diff {
    /// The files touched, in diff order.
    pub fn files(&self) -> &[DiffFile] {
        &self.files
    }

    /// Number of files touched.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when nothing was touched (zero files, zero changed lines).
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Parse unified-diff text (as produced by `git diff` or `git show`) into a
/// structured [`Diff`].
///
/// This function is total. Malformed or truncated input degrades to an
/// empty or reduced `Diff` rather than erroring: the text being analyzed is
/// already committed history, and the surrounding workflow must never block
/// on ambiguous formatting. Binary files are kept as present-but-unmeasured
/// entries.
///
/// # Examples
///
/// ```
/// use commitlens_diff::parser::parse;
///
/// let diff = "diff --git a/hello.rs b/hello.rs\n\
///             --- a/hello.rs\n\
///             +++ b/hello.rs\n\
///             @@ -1,3 +1,4 @@\n\
///             \u{20}fn main() {\n\
///             +    println!(\"hello\");\n\
///             \u{20}}\n";
/// let parsed = parse(diff);
/// assert_eq!(parsed.files().len(), 1);
/// assert_eq!(parsed.files()[0].lines_added, 1);
/// assert_eq!(parsed.files()[0].lines_removed, 0);
///
/// assert!(parse("not a diff at all").is_empty());
/// ```
pub fn parse(input: &str) -> Diff {
    let mut files: Vec<DiffFile> = Vec::new();
    let mut current: Option<DiffFile> = None;
    // Remaining line counts of the open hunk, from the @@ header. Counting
    // them down disambiguates content lines that happen to start with
    // "---" or "+++" from file markers.
    let mut old_rem: u32 = 0;
    let mut new_rem: u32 = 0;

    for line in input.lines() {
        if old_rem > 0 || new_rem > 0 {
            match line.bytes().next() {
                Some(b'+') => {
                    if let Some(file) = current.as_mut() {
                        file.lines_added += 1;
                    }
                    new_rem = new_rem.saturating_sub(1);
                    continue;
                }
                Some(b'-') => {
                    if let Some(file) = current.as_mut() {
                        file.lines_removed += 1;
                    }
                    old_rem = old_rem.saturating_sub(1);
                    continue;
                }
                Some(b' ') | None => {
                    old_rem = old_rem.saturating_sub(1);
                    new_rem = new_rem.saturating_sub(1);
                    continue;
                }
                // "\ No newline at end of file"
                Some(b'\\') => continue,
                // malformed hunk: abandon it and fall through
                _ => {
                    old_rem = 0;
                    new_rem = 0;
                }
            }
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            flush(&mut files, &mut current);
            let mut file = DiffFile::default();
            if let Some((before, after)) = parse_git_header(rest) {
                file.path_before = Some(before);
                file.path_after = Some(after);
            }
            current = Some(file);
            continue;
        }

        // Standard patches may lack the "diff --git" command line; a bare
        // "---" marker implicitly starts a file.
        if line.starts_with("--- ") && current.is_none() {
            current = Some(DiffFile::default());
        }

        let Some(file) = current.as_mut() else {
            continue;
        };

        if let Some(rest) = line
            .strip_prefix("Binary files ")
            .and_then(|r| r.strip_suffix(" differ"))
        {
            file.is_binary = true;
            if file.path_before.is_none() && file.path_after.is_none() {
                if let Some((before, after)) = rest.split_once(" and ") {
                    file.path_before = parse_marker_path(before);
                    file.path_after = parse_marker_path(after);
                }
            }
            continue;
        }

        if line.starts_with("GIT binary patch") {
            file.is_binary = true;
            continue;
        }

        if line.starts_with("new file mode") {
            file.path_before = None;
            continue;
        }

        if line.starts_with("deleted file mode") {
            file.path_after = None;
            continue;
        }

        if let Some(path) = line
            .strip_prefix("rename from ")
            .or_else(|| line.strip_prefix("copy from "))
        {
            file.path_before = Some(clean_path(path));
            continue;
        }

        if let Some(path) = line
            .strip_prefix("rename to ")
            .or_else(|| line.strip_prefix("copy to "))
        {
            file.path_after = Some(clean_path(path));
            continue;
        }

        if line.starts_with("index ")
            || line.starts_with("similarity index")
            || line.starts_with("dissimilarity index")
            || line.starts_with("old mode")
            || line.starts_with("new mode")
        {
            continue;
        }

        if let Some(path) = line.strip_prefix("--- ") {
            file.path_before = parse_marker_path(path);
            continue;
        }

        if let Some(path) = line.strip_prefix("+++ ") {
            file.path_after = parse_marker_path(path);
            continue;
        }

        if line.starts_with("@@ ") {
            if let Some((old_lines, new_lines)) = parse_hunk_header(line) {
                old_rem = old_lines;
                new_rem = new_lines;
            }
            continue;
        }

        // anything else between files is noise
    }

    flush(&mut files, &mut current);
    Diff { files }
}

fn flush(files: &mut Vec<DiffFile>, current: &mut Option<DiffFile>) {
    if let Some(file) = current.take() {
        // a record with no path at all is not a file
        if file.path_before.is_some() || file.path_after.is_some() {
            files.push(file);
        }
    }
}

/// Parse the `a/old b/new` tail of a `diff --git` command line, which is
/// the only path source for rename-only and binary entries.
fn parse_git_header(rest: &str) -> Option<(String, String)> {
    let rest = rest.trim();
    if rest.starts_with('"') {
        let mut parts: Vec<String> = Vec::new();
        let mut buf = String::new();
        let mut in_quotes = false;
        for c in rest.chars() {
            match c {
                '"' => {
                    in_quotes = !in_quotes;
                    if !in_quotes {
                        parts.push(std::mem::take(&mut buf));
                    }
                }
                _ if in_quotes => buf.push(c),
                _ => {}
            }
        }
        if parts.len() == 2 {
            return Some((strip_side_prefix(&parts[0]), strip_side_prefix(&parts[1])));
        }
        return None;
    }

    let idx = rest.rfind(" b/")?;
    let before = &rest[..idx];
    let after = &rest[idx + 1..];
    Some((strip_side_prefix(before), strip_side_prefix(after)))
}

fn strip_side_prefix(path: &str) -> String {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
        .to_string()
}

/// Paths on `rename from` / `rename to` lines carry no `a/`/`b/` prefix.
fn clean_path(path: &str) -> String {
    path.trim().trim_matches('"').to_string()
}

/// Path from a `---` / `+++` marker: `/dev/null` means the file does not
/// exist on that side.
fn parse_marker_path(raw: &str) -> Option<String> {
    // plain diffs may append a timestamp after a tab
    let raw = raw.split('\t').next().unwrap_or(raw);
    let normalized = raw.trim().trim_matches('"');
    if normalized == "/dev/null" {
        return None;
    }
    let stripped = normalized
        .strip_prefix("a/")
        .or_else(|| normalized.strip_prefix("b/"))
        .unwrap_or(normalized);
    Some(stripped.to_string())
}

/// Line counts from an `@@ -start[,count] +start[,count] @@` header.
/// Anything that does not match degrades to `None`.
fn parse_hunk_header(line: &str) -> Option<(u32, u32)> {
    let inner = line.strip_prefix("@@ ")?.split(" @@").next()?;
    let mut parts = inner.split(' ');
    let old = parts.next()?.strip_prefix('-')?;
    let new = parts.next()?.strip_prefix('+')?;
    if parts.next().is_some() {
        return None;
    }
    Some((parse_range_count(old)?, parse_range_count(new)?))
}

fn parse_range_count(range: &str) -> Option<u32> {
    match range.split_once(',') {
        Some((start, count)) => {
            start.parse::<u32>().ok()?;
            count.parse().ok()
        }
        None => {
            range.parse::<u32>().ok()?;
            Some(1)
        }
    }
}
