use std::path::Path;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use sheetfeed_core::contract::{FolderRef, ServiceError, StorageService, StoredFile};

use super::session::{check, GoogleSession};

const FILES_BASE: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

/// [`StorageService`] against the Google Drive v3 REST API.
pub struct GoogleDrive {
    session: GoogleSession,
}

impl GoogleDrive {
    pub fn new(session: GoogleSession) -> Self {
        Self { session }
    }
}

/// Content type for an upload, inferred from the local file's extension.
fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => "text/csv",
        Some("log") => "text/plain",
        _ => "text/plain",
    }
}

#[async_trait]
impl StorageService for GoogleDrive {
    async fn find_folder(
        &self,
        parent_id: &str,
        name: &str,
    ) -> Result<Option<FolderRef>, ServiceError> {
        let token = self.session.bearer()?;
        let query = format!(
            "'{parent_id}' in parents and name='{name}' and mimeType='{FOLDER_MIME}' and trashed=false"
        );
        let resp = self
            .session
            .http()
            .get(FILES_BASE)
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")])
            .bearer_auth(token)
            .send()
            .await?;
        let body: serde_json::Value = check(resp, "folder search").await?.json().await?;
        let folder = body["files"].as_array().and_then(|files| files.first()).map(|f| FolderRef {
            id: f["id"].as_str().unwrap_or_default().to_owned(),
            name: f["name"].as_str().unwrap_or(name).to_owned(),
        });
        info!(folder = %name, found = folder.is_some(), "Searched for folder");
        Ok(folder)
    }

    async fn create_folder(&self, parent_id: &str, name: &str) -> Result<FolderRef, ServiceError> {
        let token = self.session.bearer()?;
        let resp = self
            .session
            .http()
            .post(FILES_BASE)
            .query(&[("fields", "id,name")])
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "mimeType": FOLDER_MIME,
                "parents": [parent_id],
            }))
            .send()
            .await?;
        let body: serde_json::Value = check(resp, "folder creation").await?.json().await?;
        let folder = FolderRef {
            id: body["id"].as_str().unwrap_or_default().to_owned(),
            name: body["name"].as_str().unwrap_or(name).to_owned(),
        };
        info!(folder = %folder.name, id = %folder.id, "Created folder");
        Ok(folder)
    }

    async fn upload_file(
        &self,
        folder_id: &str,
        file_name: &str,
        local_path: &Path,
    ) -> Result<StoredFile, ServiceError> {
        let token = self.session.bearer()?;
        let bytes = std::fs::read(local_path)
            .map_err(|e| format!("failed to read '{}': {}", local_path.display(), e))?;

        // Media upload first, then a metadata patch to name and file the
        // upload; Drive's one-shot multipart wants multipart/related, which
        // plain form uploads do not produce.
        let resp = self
            .session
            .http()
            .post(UPLOAD_BASE)
            .query(&[("uploadType", "media"), ("fields", "id")])
            .bearer_auth(&token)
            .header("Content-Type", mime_for(local_path))
            .body(bytes)
            .send()
            .await?;
        let created: serde_json::Value = check(resp, "file upload").await?.json().await?;
        let file_id = created["id"]
            .as_str()
            .ok_or("file upload response carried no id")?
            .to_owned();

        let resp = self
            .session
            .http()
            .patch(format!("{FILES_BASE}/{file_id}"))
            .query(&[("addParents", folder_id), ("fields", "id,name")])
            .bearer_auth(&token)
            .json(&json!({ "name": file_name }))
            .send()
            .await?;
        let patched: serde_json::Value = check(resp, "file metadata update").await?.json().await?;

        let stored = StoredFile {
            id: patched["id"].as_str().unwrap_or(&file_id).to_owned(),
            name: patched["name"].as_str().unwrap_or(file_name).to_owned(),
        };
        info!(name = %stored.name, id = %stored.id, "Uploaded file to remote storage");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(mime_for(Path::new("data/test.csv")), "text/csv");
        assert_eq!(mime_for(Path::new("log/run.log")), "text/plain");
        assert_eq!(mime_for(Path::new("notes.txt")), "text/plain");
        assert_eq!(mime_for(Path::new("no_extension")), "text/plain");
    }
}
