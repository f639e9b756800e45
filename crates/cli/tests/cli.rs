//! Binary-level tests for ossctl
//!
//! Every case here fails or finishes before a request is sent, so no storage
//! service is needed. Each test points the configuration directory at an
//! empty temporary directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run ossctl with an isolated configuration directory
fn run_ossctl(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ossctl"))
        .args(args)
        .env("OSSCTL_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ossctl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_lists_command_groups() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["help"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.starts_with("Usage: ossctl"));
    assert!(text.contains("Commands:"));
    assert!(text.contains("Additional Commands:"));
    assert!(text.contains("  response-header     "));
    assert!(text.contains("bucket-policy"));
}

#[test]
fn test_no_command_prints_catalog() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&[], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("response-header"));
}

#[test]
fn test_detail_help_in_chinese() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["help", "response-header", "-L", "zh"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("概要"));
    assert!(text.contains("bucket的响应头设置"));
    assert!(text.contains("--method <value>"));
}

#[test]
fn test_configured_language_is_used_for_help() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "schema_version = 1\n\n[defaults]\nlanguage = \"zh\"\n",
    )
    .unwrap();

    let output = run_ossctl(&["help"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("其他命令"));
}

#[test]
fn test_command_help_switch() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["cors", "--help"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("SYNOPSIS"));
    assert!(text.contains("ossctl cors bucket_url [local_xml_file] [options]"));
    assert!(text.contains("OPTIONS"));
}

#[test]
fn test_help_for_alias() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["help", "policy"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("ALIASES"));
    assert!(text.contains("ossctl bucket-policy"));
}

#[test]
fn test_unknown_command() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["frobnicate", "oss://bucket"], config_dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown command: frobnicate"));
}

#[test]
fn test_help_for_unknown_command() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["help", "frobnicate"], config_dir.path());

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_argument_count_is_checked() {
    let config_dir = TempDir::new().unwrap();

    let output = run_ossctl(&["response-header", "--method", "get"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("takes 1 to 2 argument(s), got 0"));

    let output = run_ossctl(
        &["response-header", "--method", "get", "oss://b", "x", "y"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("got 3"));
}

#[test]
fn test_missing_method() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["cors", "oss://bucket"], config_dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--method value is empty"));
}

#[test]
fn test_invalid_method() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["cors", "--method", "POST", "oss://bucket"], config_dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("'POST' is not one of: put|get|delete"));
}

#[test]
fn test_unsupported_option() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(
        &["lifecycle", "--method", "get", "--item", "rules", "oss://bucket"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not support option --item"));
}

#[test]
fn test_unknown_option() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(
        &["cors", "--method", "get", "--frobnicate", "oss://bucket"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown option: --frobnicate"));
}

#[test]
fn test_put_with_missing_file() {
    let config_dir = TempDir::new().unwrap();
    let missing = config_dir.path().join("missing.xml");
    let output = run_ossctl(
        &[
            "response-header",
            "--method",
            "put",
            "oss://bucket",
            missing.to_str().unwrap(),
        ],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Local file not found"));
}

#[test]
fn test_get_without_endpoint() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["website", "--method", "get", "oss://bucket"], config_dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("endpoint is not set"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_json_error_output() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(&["--json", "frobnicate"], config_dir.path());

    assert_eq!(output.status.code(), Some(2));
    let error: serde_json::Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert!(error["error"]
        .as_str()
        .unwrap()
        .contains("Unknown command: frobnicate"));
}

#[test]
fn test_unknown_command_reported_before_option_values() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(
        &["frobnicate", "--connect-timeout", "soon", "oss://bucket"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown command: frobnicate"));
}

#[test]
fn test_unknown_command_reported_before_config_file() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "schema_version = 99\n").unwrap();

    let output = run_ossctl(&["frobnicate", "oss://bucket"], config_dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown command: frobnicate"));
}

#[test]
fn test_unsupported_option_reported_before_its_value() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(
        &["lifecycle", "--method", "get", "-L", "fr", "oss://bucket"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not support option --language"));
}

#[test]
fn test_config_file_read_only_when_connecting() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "schema_version = 99\n").unwrap();

    let output = run_ossctl(&["cors", "oss://bucket"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--method value is empty"));

    let output = run_ossctl(&["cors", "--method", "get", "oss://bucket"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("newer than supported"));
}

#[test]
fn test_option_without_value_before_another_option() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(
        &["cors", "--method", "--endpoint", "http://x", "oss://bucket"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Option --method requires a value"));
}

#[test]
fn test_role_based_authentication_is_unsupported() {
    let config_dir = TempDir::new().unwrap();
    let output = run_ossctl(
        &[
            "cors",
            "--method",
            "get",
            "--endpoint",
            "http://127.0.0.1:1",
            "-i",
            "ak",
            "-k",
            "sk",
            "--ram-role-arn",
            "acs:ram::1:role/admin",
            "oss://bucket",
        ],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(7));
    assert!(stderr(&output).contains("--ram-role-arn"));
}
