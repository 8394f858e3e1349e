//! Integration tests for the Tripsmith CLI

use std::process::Command;

/// Test that the CLI shows help with the explicit help flag
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tripsmith"));
    assert!(stdout.contains("plan"));
}

/// Test that the plan subcommand documents its options
#[test]
fn test_cli_plan_help() {
    let output = Command::new("cargo")
        .args(["run", "--", "plan", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--destination"));
    assert!(stdout.contains("--days"));
    assert!(stdout.contains("--budget"));
}

/// Without an API key the plan command must fail with a configuration
/// error, before any network traffic.
#[test]
fn test_plan_without_api_key_fails_cleanly() {
    let output = Command::new("cargo")
        .args(["run", "--", "plan", "--destination", "北京"])
        .env_remove("TRIPSMITH_LLM__API_KEY")
        .env("XDG_CONFIG_HOME", std::env::temp_dir())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("API key"),
        "expected an API-key configuration error, got: {stderr}"
    );
}
