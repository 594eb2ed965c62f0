use std::path::PathBuf;

use sheetfeed_core::contract::ServiceError;

/// Shared session for the Google API clients: one HTTP client plus lazy
/// bearer-token resolution. Construction never fails; a missing or
/// unusable credential surfaces as a [`ServiceError`] on the first call,
/// which the orchestrator treats like any other remote failure.
#[derive(Clone)]
pub struct GoogleSession {
    credentials_path: PathBuf,
    http: reqwest::Client,
}

impl GoogleSession {
    pub fn new(credentials_path: PathBuf) -> Self {
        Self {
            credentials_path,
            http: reqwest::Client::new(),
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Bearer token for API calls: the `GOOGLE_ACCESS_TOKEN` environment
    /// variable wins, otherwise the `access_token` field of the credential
    /// file.
    pub(crate) fn bearer(&self) -> Result<String, ServiceError> {
        if let Ok(token) = std::env::var("GOOGLE_ACCESS_TOKEN") {
            if !token.is_empty() {
                return Ok(token);
            }
        }

        let raw = std::fs::read_to_string(&self.credentials_path).map_err(|e| {
            format!(
                "credential file '{}' unreadable: {}",
                self.credentials_path.display(),
                e
            )
        })?;
        let creds: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            format!(
                "credential file '{}' is not valid JSON: {}",
                self.credentials_path.display(),
                e
            )
        })?;
        creds
            .get("access_token")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                "credential file has no 'access_token' field and GOOGLE_ACCESS_TOKEN is not set"
                    .into()
            })
    }
}

/// Turn a non-success HTTP response into a generic remote error carrying
/// the status and a body snippet.
pub(crate) async fn check(
    resp: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(300).collect();
    Err(format!("{what} failed with status {status}: {snippet}").into())
}
