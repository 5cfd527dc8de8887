use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabline_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "tabline")]
#[command(author, version, about = "A terminal tab strip demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Lay the strip out vertically (shorthand for `run --vertical`)
    #[arg(long = "vertical")]
    vertical: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the demo TUI
    Run {
        /// Lay the strip out vertically along the left edge
        #[arg(long)]
        vertical: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Write the default configuration file instead of printing
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    match cli.command {
        Some(Commands::Run { vertical }) => {
            commands::run::run(config, vertical || cli.vertical).await
        }
        None => commands::run::run(config, cli.vertical).await,
        Some(Commands::Config { init }) => commands::config::run(&config, init),
    }
}
