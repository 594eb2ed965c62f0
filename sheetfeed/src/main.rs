use std::path::Path;

use anyhow::Result;
use clap::Parser;

use sheetfeed::cli::{run, Cli};
use sheetfeed::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Console plus per-run log file; the run proceeds without the file if
    // setup fails, it only loses the log upload.
    let log_file = match logging::init(Path::new("log")) {
        Ok(path) => Some(path),
        Err(e) => {
            // Console-only fallback; the run only loses the log upload.
            tracing_subscriber::fmt::init();
            tracing::error!(error = %e, "Log file setup failed; console logging only");
            None
        }
    };
    tracing::info!("CLI application startup: tracing initialised, environment loaded");

    let cli = Cli::parse();
    tracing::info!("CLI arguments parsed, invoking run");
    let result = run(cli, log_file).await;
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    result
}
