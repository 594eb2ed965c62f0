//! High-level pipeline: orchestrates read → publish → archive → audit for
//! one run.
//!
//! Any stage may fail; on failure the run transitions directly to the audit
//! attempt carrying whatever diagnostic text has accumulated, then
//! terminates. No stage is retried and no remote state is rolled back. The
//! audit stage runs on every path; when credentials are missing it degrades
//! to warnings. Failures never escape this function: the caller always
//! receives a completed [`RunReport`].

use tracing::{error, info};
use uuid::Uuid;

use crate::archive::archive;
use crate::audit::{record_run, RunRecord, RunStatus};
use crate::config::RunConfig;
use crate::contract::{DocumentService, SheetService, StorageService};
use crate::publish::{publish, PublishError};
use crate::reader::read_csv;
use crate::trace::RunTrace;

/// What one completed run looked like. There is no retry loop and no
/// resumption across runs.
#[derive(Debug, serde::Serialize)]
pub struct RunReport {
    pub execution_id: String,
    pub status: RunStatus,
    pub message: String,
    /// Data rows published, when the publish stage was reached and succeeded.
    pub rows_published: Option<usize>,
    /// `None` when the archive stage was never reached.
    pub archive_ok: Option<bool>,
    pub log_sheet_ok: bool,
    pub document_ok: bool,
}

/// Short opaque token naming one run; correlates entries across both audit
/// sinks.
fn new_execution_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_owned()
}

/// Execute one full run against the given services.
pub async fn execute<S, T, D>(
    config: &RunConfig,
    sheets: &S,
    storage: &T,
    docs: &D,
) -> RunReport
where
    S: SheetService,
    T: StorageService,
    D: DocumentService,
{
    let execution_id = new_execution_id();
    let timestamp = chrono::Local::now();
    let mut trace = RunTrace::new();

    info!(execution_id = %execution_id, csv = %config.csv_path.display(), "Starting run");

    // --- Read ---
    let data = match read_csv(&config.csv_path, &mut trace) {
        Ok(data) => data,
        Err(e) => {
            error!(execution_id = %execution_id, error = %e, "Read stage failed");
            return finish(
                config, sheets, docs, execution_id, timestamp,
                RunStatus::Error, "Failed to read CSV file".to_owned(),
                None, None, trace,
            )
            .await;
        }
    };

    // --- Publish ---
    let rows = match publish(sheets, config, &data, &mut trace).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(execution_id = %execution_id, error = %e, "Publish stage failed");
            let message = match e {
                PublishError::MissingCredentials(_) => {
                    "Credential file not found".to_owned()
                }
                PublishError::Remote(_) => {
                    "Failed to write to the remote spreadsheet".to_owned()
                }
            };
            return finish(
                config, sheets, docs, execution_id, timestamp,
                RunStatus::Error, message, None, None, trace,
            )
            .await;
        }
    };

    // --- Archive ---
    // Archive failure is recorded but does not flip the run's status: the
    // data made it to the spreadsheet.
    let archive_ok = archive(storage, config, &timestamp, &mut trace).await;
    let message = if archive_ok {
        "All steps completed".to_owned()
    } else {
        "Data published; archive incomplete".to_owned()
    };

    finish(
        config, sheets, docs, execution_id, timestamp,
        RunStatus::Success, message, Some(rows), Some(archive_ok), trace,
    )
    .await
}

/// Terminal transition: persist the run record to both audit sinks and
/// assemble the report. Runs on every path.
#[allow(clippy::too_many_arguments)]
async fn finish<S, D>(
    config: &RunConfig,
    sheets: &S,
    docs: &D,
    execution_id: String,
    timestamp: chrono::DateTime<chrono::Local>,
    status: RunStatus,
    message: String,
    rows_published: Option<usize>,
    archive_ok: Option<bool>,
    mut trace: RunTrace,
) -> RunReport
where
    S: SheetService,
    D: DocumentService,
{
    let record = RunRecord {
        execution_id: execution_id.clone(),
        timestamp,
        status,
        message: message.clone(),
        row_count: rows_published,
    };
    let (log_sheet_ok, document_ok) =
        record_run(sheets, docs, config, &record, &mut trace).await;

    let report = RunReport {
        execution_id,
        status,
        message,
        rows_published,
        archive_ok,
        log_sheet_ok,
        document_ok,
    };
    match serde_json::to_string(&report) {
        Ok(json) => info!(report = %json, "Run completed"),
        Err(e) => error!(error = %e, "Failed to serialize run report"),
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_ids_are_short_and_unique() {
        let a = new_execution_id();
        let b = new_execution_id();
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
