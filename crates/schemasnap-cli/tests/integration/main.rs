//! Integration tests for the schemasnap CLI against a live MySQL server.
//!
//! These tests are behind the `integration-tests` feature flag and won't run
//! with regular `cargo test`. Run them with:
//! `cargo test -p schemasnap-cli --features integration-tests`

#![cfg(feature = "integration-tests")]

mod mysql;

use std::process::{Command, Output};

/// Run the schemasnap CLI with the given arguments and return the output.
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schemasnap"))
        .args(args)
        .output()
        .expect("failed to execute schemasnap CLI")
}

/// Run the schemasnap CLI and assert it succeeds.
pub fn run_cli_success(args: &[&str]) -> Output {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "CLI failed with status {:?}\nstderr: {}\nstdout: {}",
            output.status.code(),
            stderr,
            stdout
        );
    }
    output
}

/// Run the schemasnap CLI with `DATABASE_URL` cleared from the environment.
pub fn run_cli_unconfigured(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schemasnap"))
        .args(args)
        .env_remove("DATABASE_URL")
        .output()
        .expect("failed to execute schemasnap CLI")
}

/// Parse CLI stdout as a schema document and hand the JSON value back.
///
/// Parsing instead of substring matching keeps error messages containing
/// table names from passing as success.
pub fn parse_schema_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON output, but parsing failed: {}\nOutput was: {}",
            e, stdout
        )
    });

    assert!(
        json.get("tables").is_some()
            && json.get("views").is_some()
            && json.get("storedProcedures").is_some(),
        "Expected a schema document with 'tables', 'views' and 'storedProcedures', got: {}",
        stdout
    );
    json
}
