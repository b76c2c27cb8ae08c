// main.rs - conway_term: Game of Life on a toroidal board sized to the terminal

mod app;
mod cli;
mod fetch;
mod input;
mod terminal;

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::Cli;

fn main() -> Result<()> {
    let config = Cli::parse().into_config().context("failed to start")?;
    init_tracing(config.log_file.as_deref())?;

    if !io::stdout().is_terminal() {
        println!("{}", app::headless_status(&config));
        return Ok(());
    }

    info!(source = config.source(), interval = ?config.tick_interval, "starting conway_term");
    let rt = tokio::runtime::Runtime::new().context("failed to build tokio runtime")?;
    rt.block_on(app::run(config))
}

/// The screen belongs to the board, so logs go to a file or nowhere.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::sink),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(())
}
