//! Tracing initialization: console output plus a per-run timestamped log
//! file under the log directory. The returned file path is handed to the
//! archiver so the run's own log ends up in remote storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Create `log_dir` if needed, open a fresh timestamped log file inside it
/// and install the global subscriber writing to both stdout and that file.
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    let filename = format!(
        "sheetfeed_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let log_path = log_dir.join(filename);
    let file = fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file {:?}", log_path))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();

    Ok(log_path)
}
