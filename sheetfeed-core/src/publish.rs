//! Spreadsheet publishing stage: full-overwrite of the target worksheet
//! with the header and data rows, in order. Never an incremental sync.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use crate::config::RunConfig;
use crate::contract::{ServiceError, SheetService};
use crate::reader::CsvData;
use crate::trace::{RunTrace, Stage};

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("credential file '{}' not found", .0.display())]
    MissingCredentials(PathBuf),
    #[error("remote spreadsheet write failed: {0}")]
    Remote(ServiceError),
}

/// Clear the target worksheet, write the header as its first row, then
/// append every data row in file order. Returns the number of data rows
/// written.
pub async fn publish<S>(
    sheets: &S,
    config: &RunConfig,
    data: &CsvData,
    trace: &mut RunTrace,
) -> Result<usize, PublishError>
where
    S: SheetService,
{
    if !config.credentials_path.exists() {
        error!(path = %config.credentials_path.display(), "Credential file not found");
        error!("Download a service-account key and save it at the configured credentials path");
        error!("Then share the target spreadsheet with the service account's email address");
        trace.push(
            Stage::Publish,
            format!(
                "credential file '{}' not found; nothing written",
                config.credentials_path.display()
            ),
        );
        return Err(PublishError::MissingCredentials(
            config.credentials_path.clone(),
        ));
    }

    info!(
        spreadsheet_id = %config.spreadsheet_id,
        sheet = %config.sheet_name,
        "Publishing CSV data to remote spreadsheet"
    );

    sheets
        .clear_worksheet(&config.spreadsheet_id, &config.sheet_name)
        .await
        .map_err(PublishError::Remote)?;
    info!("Cleared existing worksheet contents");
    trace.push(Stage::Publish, "cleared existing worksheet contents");

    sheets
        .append_row(&config.spreadsheet_id, &config.sheet_name, &data.header)
        .await
        .map_err(PublishError::Remote)?;
    info!("Wrote header row");
    trace.push(Stage::Publish, format!("wrote header row: {:?}", data.header));

    for (i, row) in data.rows.iter().enumerate() {
        sheets
            .append_row(&config.spreadsheet_id, &config.sheet_name, row)
            .await
            .map_err(PublishError::Remote)?;
        let preview: Vec<&String> = row.iter().take(3).collect();
        info!(row = i + 2, preview = ?preview, "Wrote data row");
        trace.push(
            Stage::Publish,
            format!("wrote data row {}: {:?}...", i + 2, preview),
        );
    }

    info!(rows = data.rows.len(), "Finished writing to remote spreadsheet");
    trace.push(
        Stage::Publish,
        format!("wrote {} data rows in total", data.rows.len()),
    );
    Ok(data.rows.len())
}
