use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use sheetfeed_core::contract::{DocumentService, ServiceError};

use super::session::{check, GoogleSession};

const DOCS_BASE: &str = "https://docs.googleapis.com/v1/documents";

/// [`DocumentService`] against the Google Docs v1 REST API. Both operations
/// are single-request batch updates addressed by character offset.
pub struct GoogleDocs {
    session: GoogleSession,
}

impl GoogleDocs {
    pub fn new(session: GoogleSession) -> Self {
        Self { session }
    }

    async fn batch_update(
        &self,
        document_id: &str,
        request: serde_json::Value,
        what: &str,
    ) -> Result<(), ServiceError> {
        let token = self.session.bearer()?;
        let resp = self
            .session
            .http()
            .post(format!("{DOCS_BASE}/{document_id}:batchUpdate"))
            .bearer_auth(token)
            .json(&json!({ "requests": [request] }))
            .send()
            .await?;
        check(resp, what).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentService for GoogleDocs {
    async fn insert_text(
        &self,
        document_id: &str,
        index: u32,
        text: &str,
    ) -> Result<(), ServiceError> {
        self.batch_update(
            document_id,
            json!({
                "insertText": {
                    "location": { "index": index },
                    "text": text,
                }
            }),
            "document text insert",
        )
        .await?;
        info!(index, chars = text.chars().count(), "Inserted text into document");
        Ok(())
    }

    async fn style_heading(
        &self,
        document_id: &str,
        start: u32,
        end: u32,
        style: &str,
    ) -> Result<(), ServiceError> {
        self.batch_update(
            document_id,
            json!({
                "updateParagraphStyle": {
                    "range": { "startIndex": start, "endIndex": end },
                    "paragraphStyle": { "namedStyleType": style },
                    "fields": "namedStyleType",
                }
            }),
            "paragraph style update",
        )
        .await?;
        info!(start, end, style, "Styled document range");
        Ok(())
    }
}
