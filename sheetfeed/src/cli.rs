//! CLI glue for sheetfeed: argument parsing and the async entrypoint.
//!
//! All business logic lives in `sheetfeed-core`; this module wires the real
//! Google-backed services into the orchestrator. Outcomes are communicated
//! through logs only: the process exits zero even when a stage failed.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::google::{GoogleDocs, GoogleDrive, GoogleSession, GoogleSheets};
use crate::load_config::load_config;
use sheetfeed_core::run::execute;

/// CLI for sheetfeed: publish CSV snapshots to a shared spreadsheet with an
/// auditable trail.
#[derive(Parser)]
#[clap(
    name = "sheetfeed",
    version,
    about = "Publish a local CSV to a remote spreadsheet, archive it and audit the run"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute one run using the given config file
    Run {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main().
/// `log_file` is the current run's local log file, archived with the CSV.
pub async fn run(cli: Cli, log_file: Option<PathBuf>) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Run { config } => {
            let mut run_config = match load_config(&config) {
                Ok(c) => c,
                Err(e) => {
                    // Without configuration the audit sinks are unreachable;
                    // the failure degrades to local logs only.
                    tracing::error!(
                        error = %e,
                        "Failed to load configuration; run terminated before any stage"
                    );
                    return Ok(());
                }
            };
            run_config.log_file_path = log_file;

            let session = GoogleSession::new(run_config.credentials_path.clone());
            let sheets = GoogleSheets::new(session.clone());
            let storage = GoogleDrive::new(session.clone());
            let docs = GoogleDocs::new(session);

            let report = execute(&run_config, &sheets, &storage, &docs).await;
            tracing::info!(
                execution_id = %report.execution_id,
                status = %report.status,
                message = %report.message,
                "Run finished"
            );
            Ok(())
        }
    }
}
