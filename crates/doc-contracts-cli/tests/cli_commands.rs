// crates/doc-contracts-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for the scan, check, and config commands.
// Purpose: Ensure the binary emits stable JSON and exit codes.
// Dependencies: doc-contracts-cli binary, serde_json, tempfile
// ============================================================================

//! ## Overview
//! Runs the `doc-contracts` binary against documentation trees, scenario
//! files, and recorded responses written to temporary directories.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const QUIET_CONFIG: &str = "[audit]\nsink = \"none\"\n";

const USER_PAGE: &str = r#"# Get user

<!-- { "blockType": "request" } -->
```http
GET /users/42
```

<!-- { "blockType": "response", "@odata.type": "microsoft.graph.user" } -->
```json
{ "id": "42" }
```
"#;

const GROUP_PAGE: &str = r#"# Group

<!-- { "blockType": "resource", "@odata.type": "microsoft.graph.group" } -->
```json
{ "id": "string" }
```
"#;

const RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"id\":\"42\",\"name\":\"Ada\"}";

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn doc_contracts_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_doc-contracts"))
}

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(&path, contents).expect("write file");
    path
}

fn run(root: &Path, args: &[&str]) -> Output {
    let config = write(root, "doc-contracts.toml", QUIET_CONFIG);
    let mut command = Command::new(doc_contracts_bin());
    command.current_dir(root).arg("--config").arg(&config).args(args);
    command.output().expect("run doc-contracts")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// SECTION: Scan
// ============================================================================

#[test]
fn scan_directory_emits_models_in_path_order() {
    let root = TempDir::new().expect("temp dir");
    write(root.path(), "docs/users/get.md", USER_PAGE);
    write(root.path(), "docs/groups.md", GROUP_PAGE);
    write(root.path(), "docs/readme.txt", "ignored");

    let output = run(root.path(), &["scan", "docs"]);
    assert!(output.status.success(), "{}", stderr_text(&output));

    let models = stdout_json(&output);
    let models = models.as_array().expect("array of models");
    assert_eq!(models.len(), 2);
    assert_eq!(models[0]["display_name"], "/groups.md");
    assert!(models[0]["resources"]["microsoft.graph.group"].is_object());
    assert_eq!(models[1]["display_name"], "/users/get.md");
    assert_eq!(models[1]["methods"][0]["display_name"], "/users/get.md #0");
}

#[test]
fn scan_rejects_unterminated_comment() {
    let root = TempDir::new().expect("temp dir");
    let page = write(root.path(), "broken.md", "# Broken\n\n<!-- { \"blockType\": \"request\"\n");

    let output = run(root.path(), &["scan", page.to_string_lossy().as_ref()]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Failed to scan"));
}

#[test]
fn scan_rejects_oversized_document() {
    let root = TempDir::new().expect("temp dir");
    let config = write(root.path(), "small.toml", "[scan]\nmax_document_bytes = 16\n[audit]\nsink = \"none\"\n");
    let page = write(root.path(), "page.md", USER_PAGE);

    let output = Command::new(doc_contracts_bin())
        .current_dir(root.path())
        .arg("--config")
        .arg(&config)
        .arg("scan")
        .arg(&page)
        .output()
        .expect("run doc-contracts");
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Refusing to read document"));
}

// ============================================================================
// SECTION: Check
// ============================================================================

#[test]
fn check_passes_when_expectations_hold() {
    let root = TempDir::new().expect("temp dir");
    write(
        root.path(),
        "scenarios.json",
        r#"{ "name": "get-user", "expectations": { "$.id": "42", "Content-Type:": "application/json" } }"#,
    );
    write(root.path(), "response.http", RESPONSE);

    let output = run(
        root.path(),
        &["check", "--scenarios", "scenarios.json", "--response", "response.http"],
    );
    assert!(output.status.success(), "{}", stderr_text(&output));

    let reports = stdout_json(&output);
    assert_eq!(reports[0]["scenario"], "get-user");
    assert_eq!(reports[0]["passed"], true);
    assert_eq!(reports[0]["diagnostics"], Value::Array(Vec::new()));
    assert!(stderr_text(&output).contains("0 error(s), 0 warning(s) across 1 scenario(s)."));
}

#[test]
fn check_fails_on_mismatched_expectation() {
    let root = TempDir::new().expect("temp dir");
    write(
        root.path(),
        "scenarios.json",
        r#"[
            { "name": "ok", "expectations": { "$.name": "Ada" } },
            { "name": "bad", "expectations": { "$.name": "Grace" } }
        ]"#,
    );
    write(root.path(), "response.http", RESPONSE);

    let output = run(
        root.path(),
        &["check", "--scenarios", "scenarios.json", "--response", "response.http"],
    );
    assert!(!output.status.success());

    let reports = stdout_json(&output);
    assert_eq!(reports[0]["passed"], true);
    assert_eq!(reports[1]["passed"], false);
    assert_eq!(reports[1]["diagnostics"][0]["severity"], "error");
    assert!(stderr_text(&output).contains("1 error(s), 0 warning(s) across 2 scenario(s)."));
}

#[test]
fn check_warnings_pass_unless_configured() {
    let root = TempDir::new().expect("temp dir");
    write(
        root.path(),
        "scenarios.json",
        r#"{ "name": "url", "expectations": { "!url": "/users/42" } }"#,
    );
    write(root.path(), "response.http", RESPONSE);
    let args = ["check", "--scenarios", "scenarios.json", "--response", "response.http"];

    let output = run(root.path(), &args);
    assert!(output.status.success(), "{}", stderr_text(&output));

    let strict = write(
        root.path(),
        "strict.toml",
        "[validate]\nfail_on_warnings = true\n[audit]\nsink = \"none\"\n",
    );
    let output = Command::new(doc_contracts_bin())
        .current_dir(root.path())
        .arg("--config")
        .arg(&strict)
        .args(args)
        .output()
        .expect("run doc-contracts");
    assert!(!output.status.success());
}

#[test]
fn check_selects_named_scenario() {
    let root = TempDir::new().expect("temp dir");
    write(
        root.path(),
        "scenarios.json",
        r#"[
            { "name": "ok", "expectations": { "$.name": "Ada" } },
            { "name": "bad", "expectations": { "$.name": "Grace" } }
        ]"#,
    );
    write(root.path(), "response.http", RESPONSE);

    let output = run(
        root.path(),
        &[
            "check",
            "--scenarios",
            "scenarios.json",
            "--response",
            "response.http",
            "--scenario",
            "ok",
        ],
    );
    assert!(output.status.success(), "{}", stderr_text(&output));
    assert_eq!(stdout_json(&output).as_array().map(Vec::len), Some(1));

    let output = run(
        root.path(),
        &[
            "check",
            "--scenarios",
            "scenarios.json",
            "--response",
            "response.http",
            "--scenario",
            "absent",
        ],
    );
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Scenario absent not found"));
}

#[test]
fn check_rejects_invalid_scenarios() {
    let root = TempDir::new().expect("temp dir");
    write(root.path(), "scenarios.json", "not json");
    write(root.path(), "response.http", RESPONSE);

    let output = run(
        root.path(),
        &["check", "--scenarios", "scenarios.json", "--response", "response.http"],
    );
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Invalid scenarios"));
}

// ============================================================================
// SECTION: Config
// ============================================================================

#[test]
fn config_validate_accepts_valid_file() {
    let root = TempDir::new().expect("temp dir");
    let output = run(root.path(), &["config", "validate"]);
    assert!(output.status.success(), "{}", stderr_text(&output));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Config valid: "));
}

#[test]
fn config_validate_rejects_unknown_fields() {
    let root = TempDir::new().expect("temp dir");
    let config = write(root.path(), "bad.toml", "[scan]\nunknown = 1\n");

    let output = Command::new(doc_contracts_bin())
        .current_dir(root.path())
        .args(["config", "validate", "--config"])
        .arg(&config)
        .output()
        .expect("run doc-contracts");
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Failed to load config"));
}

#[test]
fn config_validate_rejects_file_sink_without_path() {
    let root = TempDir::new().expect("temp dir");
    let config = write(root.path(), "bad.toml", "[audit]\nsink = \"file\"\n");

    let output = Command::new(doc_contracts_bin())
        .current_dir(root.path())
        .args(["config", "validate", "--config"])
        .arg(&config)
        .output()
        .expect("run doc-contracts");
    assert!(!output.status.success());
}
