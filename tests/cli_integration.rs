//! CLI integration tests
//!
//! These tests run the relaybox binary and verify:
//! - Command parsing and help output
//! - Output formatting
//! - Exit codes when providers or configuration are unusable
//!
//! No test here reaches the network: every provider credential is removed
//! from the child environment, so client construction fails up front.

use std::process::{Command, Output};

const CLEARED_VARS: [&str; 11] = [
    "OPENAI_API_KEY",
    "ANTHROPIC_API_KEY",
    "GEMINI_API_KEY",
    "XAI_API_KEY",
    "GROQ_API_KEY",
    "RELAYBOX_PRIMARY_PROVIDER",
    "RELAYBOX_PRIMARY_MODEL",
    "RELAYBOX_REQUEST_TIMEOUT",
    "RELAYBOX_MAX_TOKENS",
    "RELAYBOX_MAX_MODELS",
    "RUST_LOG",
];

fn relaybox() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_relaybox"));
    for var in CLEARED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RELAYBOX_LOG_LEVEL", "error");
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("Failed to execute relaybox")
}

#[test]
fn test_cli_help() {
    let output = run(relaybox().arg("--help"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ask"));
    assert!(stdout.contains("query"));
    assert!(stdout.contains("models"));
}

#[test]
fn test_cli_version() {
    let output = run(relaybox().arg("--version"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_models_human() {
    let output = run(relaybox().arg("models"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "1. gemini-2.0-flash (text)",
            "2. gemini-1.5-flash (multimodal)",
            "3. gemini-1.5-pro (advanced)",
            "4. gemini-1.5-flash-8b (lightweight)",
        ]
    );
}

#[test]
fn test_models_json() {
    let output = run(relaybox().args(["models", "--format", "json"]));

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("models output should be JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(4));
    assert_eq!(parsed[0]["name"], "gemini-2.0-flash");
}

#[test]
fn test_config_shows_defaults() {
    let output = run(relaybox().arg("config"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gpt-4o-mini"));
}

#[test]
fn test_ask_without_any_credentials_prints_apology() {
    let output = run(relaybox().args(["ask", "What", "is", "Rust?"]));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "Sorry, something went wrong while processing your request. Please try again later."
    );
}

#[test]
fn test_query_without_secondary_credential_fails() {
    let output = run(relaybox().args(["query", "hello"]));

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_configuration_exits_with_two() {
    let output = run(relaybox()
        .env("RELAYBOX_REQUEST_TIMEOUT", "0")
        .args(["ask", "hello"]));

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_provider_exits_with_two() {
    let output = run(relaybox()
        .env("RELAYBOX_PRIMARY_PROVIDER", "watson")
        .args(["ask", "hello"]));

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid provider: watson"));
}

#[test]
fn test_non_numeric_limit_exits_with_two() {
    let output = run(relaybox().env("RELAYBOX_MAX_MODELS", "many").arg("config"));

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RELAYBOX_MAX_MODELS"));
}

#[test]
fn test_config_uses_provider_default_model() {
    let output = run(relaybox()
        .env("RELAYBOX_PRIMARY_PROVIDER", "claude")
        .arg("config"));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Primary Model: claude-3-5-haiku-latest"));
}

#[test]
fn test_default_log_level_is_info() {
    let output = run(relaybox()
        .env_remove("RELAYBOX_LOG_LEVEL")
        .args(["query", "hello"]));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Querying up to 4 models in parallel mode"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let output = run(relaybox().args(["-q", "-v", "models"]));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"));
}
