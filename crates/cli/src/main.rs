//! folio command line front end.

use anyhow::Result;
use clap::Parser;
use folio_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod ansi;
mod args;
mod commands;

use args::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.cmd {
        Command::Reveal(args) => commands::reveal(&config, args).await,
        Command::Ask(args) => commands::ask(&config, args).await,
        Command::Cache(cmd) => commands::cache(&config, cmd).await,
    }
}
