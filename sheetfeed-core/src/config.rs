//! Run configuration: every identifier, name and path one run needs.
//! Loaded once by the caller (see the CLI crate) and immutable thereafter.

use std::path::PathBuf;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunConfig {
    /// Local source CSV file.
    pub csv_path: PathBuf,
    /// Target spreadsheet and worksheet for the published data.
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// Parent folder in the remote file store; the csv/log subfolders are
    /// resolved find-or-create beneath it.
    pub drive_folder_id: String,
    pub csv_folder_name: String,
    pub log_folder_name: String,
    /// Local service-account-style credential file. Its absence is a hard
    /// failure for every remote-writing stage.
    pub credentials_path: PathBuf,
    /// Audit sinks: a worksheet in the target spreadsheet and a long-lived
    /// rich-text document.
    pub log_sheet_name: String,
    pub log_document_id: String,
    /// The current run's local log file, if one was set up. Uploaded
    /// opportunistically at archive time.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}
