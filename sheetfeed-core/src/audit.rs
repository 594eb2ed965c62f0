//! Audit stage: one row appended to a log worksheet and one styled section
//! appended to a long-lived document, per run. Both sinks are best-effort;
//! a sink failure is logged as a warning and never escalated.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::contract::{DocumentService, ServiceError, SheetService};
use crate::trace::{RunTrace, Stage};

/// Fixed header of the log worksheet; written once when the worksheet is
/// first created.
pub const LOG_SHEET_HEADER: [&str; 7] = [
    "execution_id",
    "timestamp",
    "status",
    "message",
    "csv_path",
    "row_count",
    "doc_link",
];

/// Separator appended after each document section.
const SECTION_SEPARATOR: &str = "----------------------------------------";

/// Documents insert their first body character at offset 1.
const DOC_BODY_START: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RunStatus {
    Success,
    Error,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The durable record of one run, persisted to both audit sinks.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunRecord {
    /// Opaque short token uniquely naming this run; correlates the two sinks.
    pub execution_id: String,
    pub timestamp: DateTime<Local>,
    pub status: RunStatus,
    pub message: String,
    /// Data rows published; `None` on runs that never read the file.
    pub row_count: Option<usize>,
}

/// Deep link to the run's section in the audit document, built from the
/// document identifier and the execution identifier.
pub fn document_link(document_id: &str, execution_id: &str) -> String {
    format!(
        "https://docs.google.com/document/d/{}/edit#{}",
        document_id, execution_id
    )
}

/// Persist `record` to both sinks. Returns `(log_sheet_ok, document_ok)`.
/// Degrades with warnings when the credential file is absent.
pub async fn record_run<S, D>(
    sheets: &S,
    docs: &D,
    config: &RunConfig,
    record: &RunRecord,
    trace: &mut RunTrace,
) -> (bool, bool)
where
    S: SheetService,
    D: DocumentService,
{
    if !config.credentials_path.exists() {
        warn!(
            path = %config.credentials_path.display(),
            "Credential file not found; audit sinks unreachable"
        );
        trace.push(Stage::Audit, "credential file missing; audit sinks skipped");
        return (false, false);
    }

    // Document first: the section carries the full trace accumulated so far.
    let document_ok = match append_document_section(docs, config, record, trace).await {
        Ok(link) => {
            info!(link = %link, "Appended run section to audit document");
            true
        }
        Err(e) => {
            warn!(error = %e, "Failed to append run section to audit document");
            false
        }
    };

    let link = document_link(&config.log_document_id, &record.execution_id);
    let log_sheet_ok = match append_log_row(sheets, config, record, &link).await {
        Ok(()) => {
            info!(sheet = %config.log_sheet_name, "Appended run row to log worksheet");
            true
        }
        Err(e) => {
            warn!(error = %e, "Failed to append run row to log worksheet");
            false
        }
    };

    (log_sheet_ok, document_ok)
}

/// Append one row for `record` to the log worksheet, creating the worksheet
/// with its fixed header if it does not exist yet.
pub async fn append_log_row<S>(
    sheets: &S,
    config: &RunConfig,
    record: &RunRecord,
    doc_link: &str,
) -> Result<(), ServiceError>
where
    S: SheetService,
{
    let exists = sheets
        .worksheet_exists(&config.spreadsheet_id, &config.log_sheet_name)
        .await?;
    if !exists {
        let header: Vec<String> = LOG_SHEET_HEADER.iter().map(|s| s.to_string()).collect();
        sheets
            .create_worksheet(&config.spreadsheet_id, &config.log_sheet_name, &header)
            .await?;
        info!(sheet = %config.log_sheet_name, "Created log worksheet with header");
    }

    let row = vec![
        record.execution_id.clone(),
        record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        record.status.to_string(),
        record.message.clone(),
        config.csv_path.display().to_string(),
        record.row_count.map(|n| n.to_string()).unwrap_or_default(),
        doc_link.to_owned(),
    ];
    sheets
        .append_row(&config.spreadsheet_id, &config.log_sheet_name, &row)
        .await
}

/// Insert a heading (the execution identifier) at the document's fixed
/// insertion point, style it as a top-level heading, then insert the body
/// section after it. Returns the deep link to the heading.
///
/// Insert-then-style is two steps in strict order: the style update
/// addresses text by character offset, and the offsets are only known once
/// the insert has completed.
pub async fn append_document_section<D>(
    docs: &D,
    config: &RunConfig,
    record: &RunRecord,
    trace: &RunTrace,
) -> Result<String, ServiceError>
where
    D: DocumentService,
{
    let heading = format!("{}\n", record.execution_id);
    let heading_len = heading.chars().count() as u32;

    docs.insert_text(&config.log_document_id, DOC_BODY_START, &heading)
        .await?;
    docs.style_heading(
        &config.log_document_id,
        DOC_BODY_START,
        DOC_BODY_START + heading_len,
        "HEADING_1",
    )
    .await?;

    let body = render_section_body(config, record, trace);
    docs.insert_text(&config.log_document_id, DOC_BODY_START + heading_len, &body)
        .await?;

    Ok(document_link(&config.log_document_id, &record.execution_id))
}

fn render_section_body(config: &RunConfig, record: &RunRecord, trace: &RunTrace) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "timestamp: {}\n",
        record.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
    body.push_str(&format!("status: {}\n", record.status));
    body.push_str(&format!("message: {}\n", record.message));
    body.push_str(&format!(
        "rows: {}\n",
        record.row_count.map(|n| n.to_string()).unwrap_or_default()
    ));
    body.push_str(&format!("source: {}\n", config.csv_path.display()));
    body.push('\n');
    body.push_str(&trace.render());
    body.push_str(SECTION_SEPARATOR);
    body.push('\n');
    body
}
