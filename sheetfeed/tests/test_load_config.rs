use std::fs::write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// A complete static config produces a fully-populated RunConfig.
#[test]
fn test_load_config_success_with_all_sections() {
    let config_yaml = r#"
csv_path: ./data/test.csv
credentials_path: ./creds.json
spreadsheet:
  id: "spreadsheet-123"
  sheet_name: sheet1
storage:
  folder_id: "folder-456"
  csv_folder_name: csv
  log_folder_name: log
audit:
  document_id: "doc-789"
  log_sheet_name: runlog
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = sheetfeed::load_config::load_config(config_file.path())
        .expect("Config should load");

    assert_eq!(config.csv_path, PathBuf::from("./data/test.csv"));
    assert_eq!(config.spreadsheet_id, "spreadsheet-123");
    assert_eq!(config.sheet_name, "sheet1");
    assert_eq!(config.drive_folder_id, "folder-456");
    assert_eq!(config.csv_folder_name, "csv");
    assert_eq!(config.log_folder_name, "log");
    assert_eq!(config.credentials_path, PathBuf::from("./creds.json"));
    assert_eq!(config.log_sheet_name, "runlog");
    assert_eq!(config.log_document_id, "doc-789");
    assert!(config.log_file_path.is_none());
}

/// Folder and sheet names fall back to their defaults when omitted.
#[test]
fn test_load_config_applies_defaults() {
    let config_yaml = r#"
csv_path: ./test.csv
credentials_path: ./creds.json
spreadsheet:
  id: "spreadsheet-123"
storage:
  folder_id: "folder-456"
audit:
  document_id: "doc-789"
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = sheetfeed::load_config::load_config(config_file.path())
        .expect("Config should load");

    assert_eq!(config.sheet_name, "sheet1");
    assert_eq!(config.csv_folder_name, "csv");
    assert_eq!(config.log_folder_name, "log");
    assert_eq!(config.log_sheet_name, "runlog");
}

/// A missing required key fails with a message naming exactly that key.
#[test]
fn test_load_config_missing_key_names_the_key() {
    let config_yaml = r#"
csv_path: ./test.csv
credentials_path: ./creds.json
spreadsheet:
  sheet_name: sheet1
storage:
  folder_id: "folder-456"
audit:
  document_id: "doc-789"
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let err = sheetfeed::load_config::load_config(config_file.path())
        .expect_err("config without spreadsheet.id must not load");
    assert!(
        err.to_string().contains("spreadsheet.id"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_load_config_missing_file_fails() {
    let err = sheetfeed::load_config::load_config("definitely/not/here.yaml")
        .expect_err("missing config file must not load");
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_config_rejects_malformed_yaml() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"csv_path: [unclosed").unwrap();

    let err = sheetfeed::load_config::load_config(config_file.path())
        .expect_err("malformed YAML must not load");
    assert!(err.to_string().contains("Failed to parse config YAML"));
}
