//! Tracing setup.
//!
//! The interactive search box owns the terminal, so it logs to a file;
//! one-shot commands log to stderr.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// No usable location; drop everything
    Discard,
}

/// `<cache_dir>/smartsearch/smartsearch.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("smartsearch").join("smartsearch.log"))
}

/// Filter directives for our crates; `RUST_LOG` takes precedence.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "smartsearch_core={level},smartsearch_cli={level}"
        ))
    })
}

/// Install the global subscriber.
pub fn init(verbose: bool, target: LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(verbose));

    match target {
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}")),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
        }
        LogTarget::Discard => builder
            .with_writer(std::io::sink)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}")),
    }
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}
