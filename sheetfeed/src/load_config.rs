//! Static YAML configuration loading. Every missing required key produces a
//! specific user-facing message naming that key.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use sheetfeed_core::config::RunConfig;

#[derive(Deserialize)]
struct StaticConfig {
    csv_path: Option<PathBuf>,
    credentials_path: Option<PathBuf>,
    spreadsheet: Option<SpreadsheetSection>,
    storage: Option<StorageSection>,
    audit: Option<AuditSection>,
}

#[derive(Deserialize)]
struct SpreadsheetSection {
    id: Option<String>,
    #[serde(default = "default_sheet_name")]
    sheet_name: String,
}

#[derive(Deserialize)]
struct StorageSection {
    folder_id: Option<String>,
    #[serde(default = "default_csv_folder")]
    csv_folder_name: String,
    #[serde(default = "default_log_folder")]
    log_folder_name: String,
}

#[derive(Deserialize)]
struct AuditSection {
    document_id: Option<String>,
    #[serde(default = "default_log_sheet")]
    log_sheet_name: String,
}

fn default_sheet_name() -> String {
    "sheet1".to_owned()
}
fn default_csv_folder() -> String {
    "csv".to_owned()
}
fn default_log_folder() -> String {
    "log".to_owned()
}
fn default_log_sheet() -> String {
    "runlog".to_owned()
}

fn require<T>(value: Option<T>, key: &str) -> Result<T> {
    value.ok_or_else(|| {
        error!(key = %key, "Required config key is missing");
        anyhow::anyhow!("missing required config key '{key}'")
    })
}

/// Load the static YAML config file and assemble a [`RunConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let spreadsheet = require(static_conf.spreadsheet, "spreadsheet")?;
    let storage = require(static_conf.storage, "storage")?;
    let audit = require(static_conf.audit, "audit")?;

    let config = RunConfig {
        csv_path: require(static_conf.csv_path, "csv_path")?,
        spreadsheet_id: require(spreadsheet.id, "spreadsheet.id")?,
        sheet_name: spreadsheet.sheet_name,
        drive_folder_id: require(storage.folder_id, "storage.folder_id")?,
        csv_folder_name: storage.csv_folder_name,
        log_folder_name: storage.log_folder_name,
        credentials_path: require(static_conf.credentials_path, "credentials_path")?,
        log_sheet_name: audit.log_sheet_name,
        log_document_id: require(audit.document_id, "audit.document_id")?,
        log_file_path: None,
    };

    info!(
        csv_path = %config.csv_path.display(),
        spreadsheet_id = %config.spreadsheet_id,
        "Config loaded and merged successfully"
    );
    Ok(config)
}
