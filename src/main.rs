mod export;
mod form;
mod ledger;
mod models;
mod run;
mod store;
mod summary;
mod ui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use models::Currency;

/// CoinKeeper: a local-only expense tracker for the terminal.
///
/// With no subcommand the interactive screen starts.
#[derive(Debug, Parser)]
#[command(name = "coinkeeper", version, about)]
struct Cli {
    /// Directory holding coinkeeper.db and coinkeeper.log
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Display currency for this run (e.g. EUR); the saved choice is used otherwise
    #[arg(long, value_name = "CODE")]
    currency: Option<String>,

    /// Log debug events
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<run::CliCommand>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    setup_logging(&data_dir, cli.verbose)?;
    tracing::info!(data_dir = %data_dir.display(), "starting coinkeeper");

    let store = store::Store::open(&data_dir.join("coinkeeper.db"))?;

    let currency = cli.currency.as_deref().map(parse_currency).transpose()?;

    match cli.command {
        None => run::as_tui(&store, currency),
        Some(command) => {
            let currency = currency.unwrap_or_else(|| store.load_currency());
            run::as_cli(command, &store, currency)
        }
    }
}

fn parse_currency(code: &str) -> Result<Currency> {
    Currency::parse(code).ok_or_else(|| anyhow::anyhow!("Unknown currency: {code}"))
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "coinkeeper", "CoinKeeper")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn setup_logging(data_dir: &Path, verbose: bool) -> Result<()> {
    let path = data_dir.join("coinkeeper.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(level);

    tracing_subscriber::registry().with(file_log).init();
    Ok(())
}
