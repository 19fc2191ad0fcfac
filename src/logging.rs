//! Logging through `tracing` and `tracing-subscriber`.
//!
//! The TUI owns the terminal, so interactive sessions log to a file in the
//! data directory. CLI commands log to stderr. A log file that cannot be
//! opened never stops the app: events are discarded instead.

use crate::config::{Config, LOG_ENV};
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// `RECIPEBOX_LOG` wins over the configured level.
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// File writer for `path`, or a sink when the file cannot be opened.
fn file_writer(path: &Path) -> BoxMakeWriter {
    match open_log_file(path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::sink),
    }
}

pub fn init_logging(config: &Config, target: LogTarget) -> Result<()> {
    let filter = env_filter(config);

    match target {
        LogTarget::File(path) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(file_writer(&path))
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}")),
    }
}
