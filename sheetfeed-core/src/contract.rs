//! # contract: capability interfaces for the remote services
//!
//! This module defines the three traits the pipeline depends on —
//! [`SheetService`] for the remote spreadsheet, [`StorageService`] for the
//! remote file store and [`DocumentService`] for the rich-text document —
//! plus the plain data types exchanged across those seams.
//!
//! ## Interface & Extensibility
//! - Implement a trait to plug in a new backend (HTTP client, local fake, mock).
//! - All methods are async and return a boxed [`ServiceError`]: callers treat
//!   every remote failure generically, regardless of underlying cause.
//! - The traits carry no authentication or transport detail; the implementor
//!   owns session handling end to end.
//!
//! ## Mocking & Testing
//! - Each trait is annotated for `mockall`, so tests generate deterministic
//!   mocks (enable the `test-export-mocks` feature from dependents).

use std::path::Path;

use async_trait::async_trait;

/// Uniform error type at the service seams. Remote failures are not
/// differentiated by cause (network, auth, quota all look alike here).
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// A folder in the remote file store, resolved by find-or-create.
/// Never cached across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRef {
    pub id: String,
    pub name: String,
}

/// A file stored remotely, as reported back by the store after an upload.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
}

/// Remote spreadsheet capabilities: worksheet lookup/creation, full clears
/// and ordered row appends. Used by both the publishing stage and the
/// log-sheet audit sink.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait SheetService: Send + Sync {
    /// Whether a worksheet with the given title exists in the spreadsheet.
    async fn worksheet_exists(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<bool, ServiceError>;

    /// Create a worksheet with the given title and write `header` as its
    /// first row.
    async fn create_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        header: &[String],
    ) -> Result<(), ServiceError>;

    /// Destroy all existing content of the worksheet.
    async fn clear_worksheet(&self, spreadsheet_id: &str, title: &str)
        -> Result<(), ServiceError>;

    /// Append one row after the last non-empty row of the worksheet.
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        title: &str,
        row: &[String],
    ) -> Result<(), ServiceError>;
}

/// Remote file-store capabilities: folder lookup by exact name under a
/// parent (non-recursive), folder creation, and file upload.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Find a folder named exactly `name` directly under `parent_id`.
    /// Returns `Ok(None)` when no such folder exists.
    async fn find_folder(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<Option<FolderRef>, ServiceError>;

    /// Create a folder named `name` directly under `parent_id`.
    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<FolderRef, ServiceError>;

    /// Upload the local file at `local_path` into `folder_id` under the
    /// remote name `file_name`. Content type is inferred from the local
    /// file's extension.
    async fn upload_file(
        &self,
        folder_id: &str,
        file_name: &str,
        local_path: &Path,
    ) -> Result<StoredFile, ServiceError>;
}

/// Remote rich-text document capabilities: batch text insertion at a
/// character offset and paragraph styling over an offset range. Offsets are
/// only known once the preceding insert has completed, so callers sequence
/// these two calls strictly.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Insert `text` at character offset `index` in the document body.
    async fn insert_text(
        &self,
        document_id: &str,
        index: u32,
        text: &str,
    ) -> Result<(), ServiceError>;

    /// Apply the named paragraph style to the character range
    /// `start..end` of the document body.
    async fn style_heading(
        &self,
        document_id: &str,
        start: u32,
        end: u32,
        style: &str,
    ) -> Result<(), ServiceError>;
}
