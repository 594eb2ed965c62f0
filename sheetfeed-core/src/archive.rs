//! Storage archiving stage: resolve destination folders find-or-create,
//! then upload the source CSV under a timestamped name and, when present,
//! the run's log file. Individual upload failures never abort the rest.

use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::config::RunConfig;
use crate::contract::{FolderRef, ServiceError, StorageService};
use crate::trace::{RunTrace, Stage};

/// Resolve a folder named exactly `name` directly under `parent_id`,
/// creating it only if absent. Idempotent: a second call with the same
/// arguments reuses the found folder instead of duplicating it.
pub async fn resolve_folder<S>(
    storage: &S,
    parent_id: &str,
    name: &str,
) -> Result<FolderRef, ServiceError>
where
    S: StorageService,
{
    if let Some(folder) = storage.find_folder(parent_id, name).await? {
        info!(folder = %name, id = %folder.id, "Using existing folder");
        return Ok(folder);
    }
    let folder = storage.create_folder(parent_id, name).await?;
    info!(folder = %name, id = %folder.id, "Created new folder");
    Ok(folder)
}

/// The timestamped remote name for an archived file:
/// `<base>_<YYYYMMDD_HHMMSS>.<ext>`.
pub fn archived_name(local_path: &Path, timestamp: &DateTime<Local>) -> String {
    let stem = local_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_owned());
    let ext = local_path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_owned());
    format!("{}_{}.{}", stem, timestamp.format("%Y%m%d_%H%M%S"), ext)
}

/// Archive the run's files into the remote store. Returns true only if
/// every attempted sub-operation succeeded. Folder-resolution failure is
/// hard for the affected uploads but never for the overall run; the CSV and
/// log uploads are independent of each other.
pub async fn archive<S>(
    storage: &S,
    config: &RunConfig,
    timestamp: &DateTime<Local>,
    trace: &mut RunTrace,
) -> bool
where
    S: StorageService,
{
    if !config.credentials_path.exists() {
        error!(path = %config.credentials_path.display(), "Credential file not found; skipping archive");
        trace.push(
            Stage::Archive,
            format!(
                "credential file '{}' not found; nothing archived",
                config.credentials_path.display()
            ),
        );
        return false;
    }

    info!("Starting remote archive of run files");
    let mut all_ok = true;

    // CSV upload, under its own find-or-create subfolder.
    match resolve_folder(storage, &config.drive_folder_id, &config.csv_folder_name).await {
        Ok(folder) => {
            let name = archived_name(&config.csv_path, timestamp);
            all_ok &= upload_one(storage, &folder, &name, &config.csv_path, trace).await;
        }
        Err(e) => {
            error!(folder = %config.csv_folder_name, error = %e, "Failed to resolve csv folder");
            trace.push(
                Stage::Archive,
                format!("failed to resolve folder '{}': {}", config.csv_folder_name, e),
            );
            all_ok = false;
        }
    }

    // Log upload is opportunistic: only attempted when a log file exists.
    match resolve_folder(storage, &config.drive_folder_id, &config.log_folder_name).await {
        Ok(folder) => {
            if let Some(log_path) = config.log_file_path.as_deref().filter(|p| p.exists()) {
                let name = log_path
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "run.log".to_owned());
                all_ok &= upload_one(storage, &folder, &name, log_path, trace).await;
            } else {
                info!("No run log file present; skipping log upload");
                trace.push(Stage::Archive, "no run log file present; skipped log upload");
            }
        }
        Err(e) => {
            error!(folder = %config.log_folder_name, error = %e, "Failed to resolve log folder");
            trace.push(
                Stage::Archive,
                format!("failed to resolve folder '{}': {}", config.log_folder_name, e),
            );
            all_ok = false;
        }
    }

    if all_ok {
        info!("Remote archive completed");
        trace.push(Stage::Archive, "archive completed");
    } else {
        warn!("Remote archive completed with failures");
        trace.push(Stage::Archive, "archive completed with failures");
    }
    all_ok
}

async fn upload_one<S>(
    storage: &S,
    folder: &FolderRef,
    file_name: &str,
    local_path: &Path,
    trace: &mut RunTrace,
) -> bool
where
    S: StorageService,
{
    if !local_path.exists() {
        error!(path = %local_path.display(), "File to upload not found");
        trace.push(
            Stage::Archive,
            format!("file '{}' not found; upload skipped", local_path.display()),
        );
        return false;
    }
    match storage.upload_file(&folder.id, file_name, local_path).await {
        Ok(stored) => {
            info!(name = %stored.name, id = %stored.id, folder = %folder.name, "Uploaded file");
            trace.push(
                Stage::Archive,
                format!("uploaded '{}' into folder '{}'", stored.name, folder.name),
            );
            true
        }
        Err(e) => {
            error!(name = %file_name, folder = %folder.name, error = %e, "Upload failed");
            trace.push(
                Stage::Archive,
                format!("failed to upload '{}' into folder '{}': {}", file_name, folder.name, e),
            );
            false
        }
    }
}
