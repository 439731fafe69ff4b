//! CLI integration tests
//!
//! These tests run the built binary against a scratch database and check
//! the JSON it prints and the exit status.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("intraops.db")
}

fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_intraops");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .env("INTRAOPS_DB", db_path(temp_dir))
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn run_ok(temp_dir: &TempDir, args: &[&str]) -> Value {
    let output = run(temp_dir, args);
    assert!(
        output.status.success(),
        "CLI command {:?} should succeed. Stderr: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn write_config(dir: &Path, body: &str) {
    std::fs::write(dir.join("intraops.toml"), body).unwrap();
}

#[test]
fn test_migrate_reports_schema() {
    let temp_dir = TempDir::new().unwrap();

    let first = run_ok(&temp_dir, &["migrate"]);
    assert_eq!(first["applied"], serde_json::json!(["001_accounting_schema"]));
    assert_eq!(first["migrations"][0]["id"], "001_accounting_schema");

    let second = run_ok(&temp_dir, &["migrate"]);
    assert_eq!(second["applied"], serde_json::json!([]));
    assert!(db_path(&temp_dir).exists());
}

#[test]
fn test_account_group_lifecycle() {
    let temp_dir = TempDir::new().unwrap();

    let created = run_ok(
        &temp_dir,
        &[
            "account-group",
            "create",
            "--number",
            "4000",
            "--name",
            "Revenue",
        ],
    );
    let id = created["id"].as_str().unwrap().to_string();

    let view = run_ok(&temp_dir, &["account-group", "get", "--id", &id]);
    assert_eq!(view["display_name"], "4000 - Revenue");

    let updated = run_ok(
        &temp_dir,
        &[
            "account-group",
            "update",
            "--id",
            &id,
            "--number",
            "4100",
            "--name",
            "Service revenue",
            "--description",
            "Consulting",
        ],
    );
    assert_eq!(updated["number"], "4100");
    assert_eq!(updated["description"], "Consulting");

    let page = run_ok(&temp_dir, &["account-group", "list"]);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["has_more"], false);

    let deleted = run_ok(&temp_dir, &["account-group", "delete", "--id", &id]);
    assert_eq!(deleted["deleted"], true);

    let output = run(&temp_dir, &["account-group", "get", "--id", &id]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_invalid_input_exits_with_validation_code() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(
        &temp_dir,
        &[
            "payment-term",
            "create",
            "--name",
            "Odd",
            "--days",
            "10",
            "--discount-days",
            "20",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_VALIDATION_FAILED"), "stderr: {}", stderr);
    assert!(stderr.contains("discount_days"), "stderr: {}", stderr);
}

#[test]
fn test_payment_term_list_pages() {
    let temp_dir = TempDir::new().unwrap();
    for (name, days) in [("Net 30", "30"), ("Net 60", "60"), ("Net 90", "90")] {
        run_ok(
            &temp_dir,
            &["payment-term", "create", "--name", name, "--days", days],
        );
    }

    let first = run_ok(&temp_dir, &["payment-term", "list", "--limit", "2"]);
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_eq!(first["has_more"], true);

    let cursor = first["next_cursor"].as_str().unwrap().to_string();
    let second = run_ok(
        &temp_dir,
        &["payment-term", "list", "--limit", "2", "--cursor", &cursor],
    );
    assert_eq!(second["items"][0]["name"], "Net 90");
    assert_eq!(second["has_more"], false);
}

#[test]
fn test_configured_operator_without_write_permission_is_forbidden() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        r#"
        log_profile = "test"

        [operator]
        user_id = "viewer"
        permissions = ["accounting.payment_terms.read"]
        "#,
    );

    let output = run(
        &temp_dir,
        &["payment-term", "create", "--name", "Net 30", "--days", "30"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_FORBIDDEN"));

    let page = run_ok(&temp_dir, &["payment-term", "list"]);
    assert!(page["items"].as_array().unwrap().is_empty());
}

#[test]
fn test_malformed_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "log_profile = \"verbose\"\n");

    let output = run(&temp_dir, &["migrate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_CONFIG"));
}
