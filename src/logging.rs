//! File logging
//!
//! The terminal belongs to the UI, so trace output goes to a log file.

use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;

/// Parse a level name, falling back to `info`
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::INFO)
}

/// Install the global subscriber, appending to `path`
pub fn init(path: &Path, level: &str) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(parse_level(level))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}
