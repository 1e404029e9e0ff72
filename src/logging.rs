//! File logging for the editor.
//!
//! The terminal belongs to the UI, so logs only go to a daily rolling file.
//! Filter with `RUST_LOG` (default `info`), e.g.
//! `RUST_LOG=revenue_table::history=debug`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(logs_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create log dir {}", logs_dir.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::daily(logs_dir, "revenue-table.log");

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .context("tracing subscriber already installed")?;
    Ok(())
}
