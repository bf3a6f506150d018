//! End-to-end checks of the patch-mode CLI: no git repository involved.

use std::path::Path;
use std::process::{Command, Output};

fn run_check(dir: &Path, patch: &str, message: &str, extra: &[&str]) -> Output {
    let patch_path = dir.join("change.patch");
    std::fs::write(&patch_path, patch).unwrap();

    Command::new(env!("CARGO_BIN_EXE_commitlens"))
        .arg("check")
        .arg("--file")
        .arg(&patch_path)
        .arg("--message")
        .arg(message)
        .args(extra)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn additions_patch(lines: u32) -> String {
    let mut patch = format!(
        "diff --git a/src/gen.rs b/src/gen.rs\n\
         --- a/src/gen.rs\n\
         +++ b/src/gen.rs\n\
         @@ -1,1 +1,{} @@\n context\n",
        lines + 1
    );
    for i in 0..lines {
        patch.push_str(&format!("+line {i}\n"));
    }
    patch
}

#[test]
fn consistent_patch_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_check(dir.path(), &additions_patch(3), "add generated lines", &[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CONSISTENT"));
}

#[test]
fn size_mismatch_exits_one_with_finding() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_check(dir.path(), &additions_patch(60), "fix typo", &[]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("size_mismatch"));
    assert!(stdout.contains("60 lines"));
}

#[test]
fn json_output_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_check(
        dir.path(),
        &additions_patch(60),
        "fix typo",
        &["--format", "json"],
    );

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["verdict"], "inconsistent");
    assert_eq!(value["findings"][0]["check"], "size_mismatch");
    assert_eq!(value["stats"]["linesAdded"], 60);
}

#[test]
fn missing_message_is_an_operational_error() {
    let dir = tempfile::tempdir().unwrap();
    let patch_path = dir.path().join("change.patch");
    std::fs::write(&patch_path, additions_patch(3)).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_commitlens"))
        .arg("check")
        .arg("--file")
        .arg(&patch_path)
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}
