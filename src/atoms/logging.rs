//! File logging setup.
//!
//! The terminal belongs to the editor UI, so all output goes to
//! `<config dir>/logs/slidemark.log` with daily rotation. `RUST_LOG` takes
//! precedence over the configured level, e.g. `RUST_LOG=slidemark=trace`.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn ensure_logs_dir(config_dir: &Path) -> Result<PathBuf> {
    let dir = config_dir.join("logs");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create logs directory: {:?}", dir))?;
    Ok(dir)
}

pub fn init(config_dir: &Path, level: &str) -> Result<()> {
    let logs_dir = ensure_logs_dir(config_dir)?;
    let file_appender = tracing_appender::rolling::daily(logs_dir, "slidemark.log");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .with_context(|| "Failed to initialize logging")?;

    Ok(())
}
