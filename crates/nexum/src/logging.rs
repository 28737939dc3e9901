//! File logging, enabled through `NEXUM_LOG`.
//!
//! The terminal belongs to the UI, so log lines go to `nexum.log` in the
//! platform data directory.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `nexum_canvas=debug`.
pub const LOG_ENV: &str = "NEXUM_LOG";
const LOG_FILE: &str = "nexum.log";

fn log_dir() -> PathBuf {
    ProjectDirs::from("studio", "nexum", "nexum")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
}

/// Install the subscriber when `NEXUM_LOG` is set. Returns the log file path.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    let filter = EnvFilter::try_new(directives)?;

    let dir = log_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(Some(path))
}
