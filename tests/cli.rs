use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/readaloud.sqlite"

[server]
port = 3999

[fetch]
system_proxy = false
"#,
        root.display()
    );

    let config_path = config_dir.join("readaloud.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_readaloud(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_readaloud"))
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("PORT")
        .output()
        .expect("failed to run readaloud binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_readaloud(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Database initialized"));
    assert!(tmp.path().join("data/readaloud.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_readaloud(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_readaloud(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_get_unknown_url_fails() {
    let (_tmp, config_path) = setup_test_env();

    run_readaloud(&config_path, &["init"]);
    let (_, stderr, success) = run_readaloud(&config_path, &["get", "https://example.com/never"]);
    assert!(!success);
    assert!(stderr.contains("no stored text for"));
}

#[test]
fn test_extract_rejects_invalid_url() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_readaloud(&config_path, &["extract", "not-a-link"]);
    assert!(!success);
    assert!(stderr.contains("Invalid URL submitted"));
    assert!(stderr.contains("relative URL without a base"));

    let (_, stderr, success) = run_readaloud(&config_path, &["extract", "ftp://example.com/a"]);
    assert!(!success);
    assert!(stderr.contains("unsupported scheme 'ftp'"));
}

#[test]
fn test_malformed_config_is_reported() {
    let (_tmp, config_path) = setup_test_env();
    fs::write(&config_path, "[server\nport = ").unwrap();

    let (_, stderr, success) = run_readaloud(&config_path, &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to parse config file"));
}
