//! Integration tests for what the lmsq binary writes to stderr on failure.
//!
//! Runs the real executable with an isolated config directory and default logging,
//! then checks that stderr holds the classified error and nothing else.

use serde_json::{json, Value};
use std::process::{Command, Output};
use tempfile::TempDir;

const NO_KEY_MESSAGE: &str =
    "No API key configured. Run `lmsq auth login` or set LEMONSQUEEZY_API_KEY.";

fn run_lmsq(temp_dir: &TempDir, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let home = temp_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();

    let bin = env!("CARGO_BIN_EXE_lmsq");
    let mut command = Command::new(bin);
    command
        .env("HOME", home.as_os_str())
        .env("XDG_CONFIG_HOME", temp_dir.path().as_os_str())
        .env_remove("LEMONSQUEEZY_API_KEY")
        .env_remove("LEMONSQUEEZY_BASE_URL")
        .env_remove("LMSQ_LOG")
        .env_remove("LMSQ_LOG_FORMAT")
        .env_remove("LMSQ_LOG_OUTPUT")
        .args(args);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_json_missing_key_stderr_is_only_the_error_document() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_lmsq(&temp_dir, &["--json", "stores", "list"], &[]);

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let text = stderr(&output);
    let parsed: Value = serde_json::from_str(text.trim())
        .unwrap_or_else(|e| panic!("stderr is not one JSON document ({e}): {text:?}"));
    assert_eq!(
        parsed,
        json!({"error": "auth_error", "message": NO_KEY_MESSAGE})
    );
}

#[test]
fn test_text_missing_key_stderr_has_no_log_lines_or_ansi() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_lmsq(&temp_dir, &["stores", "list"], &[]);

    assert_eq!(output.status.code(), Some(3));
    let text = stderr(&output);
    assert_eq!(
        text,
        format!("error: auth_error\nmessage: {}\n", NO_KEY_MESSAGE)
    );
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_json_usage_error_exits_2_with_fields() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_lmsq(&temp_dir, &["--json", "stores", "list", "--status", "paid"], &[]);

    assert_eq!(output.status.code(), Some(2));
    let parsed: Value = serde_json::from_str(stderr(&output).trim()).unwrap();
    assert_eq!(parsed["error"], json!("invalid_usage"));
    assert_eq!(parsed["fields"], json!(["--status"]));
}

#[test]
fn test_json_connection_failure_exits_4() {
    let temp_dir = TempDir::new().unwrap();
    // Nothing is expected to listen on the discard port.
    let output = run_lmsq(
        &temp_dir,
        &["--json", "--api-key", "lsq_test_key", "user"],
        &[("LEMONSQUEEZY_BASE_URL", "http://127.0.0.1:9")],
    );

    assert_eq!(output.status.code(), Some(4));
    let parsed: Value = serde_json::from_str(stderr(&output).trim()).unwrap();
    assert_eq!(parsed["error"], json!("network_error"));
    assert!(parsed.get("status").is_none());
}

#[test]
fn test_verbose_still_writes_logs_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_lmsq(&temp_dir, &["--verbose", "stores", "list"], &[]);

    assert_eq!(output.status.code(), Some(3));
    let text = stderr(&output);
    assert!(text.contains("Executing command"), "{text:?}");
    assert!(!text.contains('\u{1b}'), "stderr is a pipe, no ANSI expected");
    assert!(text.ends_with(&format!("message: {}\n", NO_KEY_MESSAGE)));
}

#[test]
fn test_successful_logout_exits_0_with_clean_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("lmsq").join("config.toml");
    std::fs::create_dir_all(config.parent().unwrap()).unwrap();
    std::fs::write(
        &config,
        "api_key = \"lsq_test_0123456789\"\nbase_url = \"http://127.0.0.1:9/v1\"\n",
    )
    .unwrap();

    let output = run_lmsq(&temp_dir, &["auth", "logout"], &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("API key removed from"));
    let text = std::fs::read_to_string(&config).unwrap();
    assert!(!text.contains("api_key"));
    assert!(text.contains("base_url"));
}
