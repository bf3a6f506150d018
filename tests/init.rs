use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_commitlens"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "commitlens init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = dir.path().join(".commitlens.toml");
    assert!(config_path.exists(), ".commitlens.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[checks]"));
    assert!(content.contains("[vocab]"));
    assert!(content.contains("[log]"));

    // Verify it's valid TOML that commitlens-core can parse
    let _config: commitlens_core::LensConfig = toml::from_str(&content).unwrap();
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".commitlens.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_commitlens"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}
