//! Reqwest-backed implementations of the core capability traits against the
//! Google Sheets, Drive and Docs REST APIs.
//!
//! All three clients share a [`GoogleSession`]: it owns the HTTP client and
//! resolves the bearer token from the environment or the service-account
//! credential file. Transport and serialization detail stays in here; the
//! core crate only ever sees the trait contracts.

mod docs;
mod drive;
mod session;
mod sheets;

pub use docs::GoogleDocs;
pub use drive::GoogleDrive;
pub use session::GoogleSession;
pub use sheets::GoogleSheets;
