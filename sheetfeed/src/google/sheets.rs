use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use sheetfeed_core::contract::{ServiceError, SheetService};

use super::session::{check, GoogleSession};

const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// [`SheetService`] against the Google Sheets v4 REST API.
pub struct GoogleSheets {
    session: GoogleSession,
}

impl GoogleSheets {
    pub fn new(session: GoogleSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SheetService for GoogleSheets {
    async fn worksheet_exists(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<bool, ServiceError> {
        let token = self.session.bearer()?;
        let resp = self
            .session
            .http()
            .get(format!("{SHEETS_BASE}/{spreadsheet_id}"))
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(token)
            .send()
            .await?;
        let body: serde_json::Value = check(resp, "spreadsheet lookup").await?.json().await?;
        let exists = body["sheets"]
            .as_array()
            .map(|sheets| {
                sheets
                    .iter()
                    .any(|s| s["properties"]["title"].as_str() == Some(title))
            })
            .unwrap_or(false);
        info!(sheet = %title, exists, "Checked worksheet existence");
        Ok(exists)
    }

    async fn create_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
        header: &[String],
    ) -> Result<(), ServiceError> {
        let token = self.session.bearer()?;
        let resp = self
            .session
            .http()
            .post(format!("{SHEETS_BASE}/{spreadsheet_id}:batchUpdate"))
            .bearer_auth(&token)
            .json(&json!({
                "requests": [{ "addSheet": { "properties": { "title": title } } }]
            }))
            .send()
            .await?;
        check(resp, "worksheet creation").await?;
        info!(sheet = %title, "Created worksheet");

        self.append_row(spreadsheet_id, title, header).await
    }

    async fn clear_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<(), ServiceError> {
        let token = self.session.bearer()?;
        let resp = self
            .session
            .http()
            .post(format!("{SHEETS_BASE}/{spreadsheet_id}/values/{title}:clear"))
            .bearer_auth(token)
            .json(&json!({}))
            .send()
            .await?;
        check(resp, "worksheet clear").await?;
        info!(sheet = %title, "Cleared worksheet contents");
        Ok(())
    }

    async fn append_row(
        &self,
        spreadsheet_id: &str,
        title: &str,
        row: &[String],
    ) -> Result<(), ServiceError> {
        let token = self.session.bearer()?;
        let resp = self
            .session
            .http()
            .post(format!(
                "{SHEETS_BASE}/{spreadsheet_id}/values/{title}:append"
            ))
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check(resp, "row append").await?;
        Ok(())
    }
}
