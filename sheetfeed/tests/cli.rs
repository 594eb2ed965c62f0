use std::fs::write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Failures are communicated via logs only: a missing config file still
/// exits zero, with the failure in the output.
#[test]
fn run_cli_exits_zero_when_config_is_missing() {
    let dir = tempdir().expect("temp working dir");

    let mut cmd = Command::cargo_bin("sheetfeed").expect("Binary exists");
    cmd.current_dir(dir.path())
        .arg("run")
        .arg("--config")
        .arg("does-not-exist.yaml");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Failed to load configuration"));
}

/// With valid config but no CSV file, the run terminates with an error
/// status in the logs, never an abnormal exit.
#[test]
fn run_cli_logs_read_failure_and_exits_zero() {
    let dir = tempdir().expect("temp working dir");
    let config_path = dir.path().join("sheetfeed.yaml");
    write(
        &config_path,
        r#"
csv_path: ./missing.csv
credentials_path: ./missing-creds.json
spreadsheet:
  id: "spreadsheet-123"
storage:
  folder_id: "folder-456"
audit:
  document_id: "doc-789"
"#,
    )
    .expect("Writing temp config failed");

    let mut cmd = Command::cargo_bin("sheetfeed").expect("Binary exists");
    cmd.current_dir(dir.path())
        .arg("run")
        .arg("--config")
        .arg(&config_path);

    // The credential file is also absent, so no remote call is ever made;
    // the audit sinks degrade with warnings and the process still exits 0.
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("CSV file")
                .and(predicate::str::contains("Run finished")),
        );

    // The per-run log file was created in the working directory.
    let log_entries: Vec<_> = std::fs::read_dir(dir.path().join("log"))
        .expect("log directory exists")
        .collect();
    assert_eq!(log_entries.len(), 1, "one timestamped log file per run");
}
