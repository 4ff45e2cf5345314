#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;

use cli::commands::{Cli, Commands};
use elite_editor::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS.
    // This prevents the error: "could not automatically determine the process-level CryptoProvider"
    // when both aws-lc-rs and ring features are available (or neither is explicitly selected).
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();
    let config = Config::load_or_init()?;
    init_logging(&cli, &config)?;

    app::dispatch::dispatch(cli, config).await
}

/// The TUI owns the terminal, so logs go to a file there and to stderr
/// everywhere else.
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.observability.level()
    };
    let to_file = matches!(cli.command, None | Some(Commands::Tui));

    if to_file {
        let path = config.log_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("setting default subscriber failed")?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("setting default subscriber failed")?;
    }
    Ok(())
}
