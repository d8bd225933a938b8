//! `marquee` command-line client.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use marquee_config::{ConfigLoader, loader::CONFIG_PATH_VAR};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{BrowseArgs, WatchArgs};

#[derive(Parser, Debug)]
#[command(name = "marquee", version)]
#[command(about = "Browse a bilingual movie and TV catalog from the terminal")]
struct Cli {
    /// Config file to use instead of the default search locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print one page of the catalog
    Browse(BrowseArgs),
    /// Follow the realtime relay and print notifications
    Watch(WatchArgs),
    /// Print the effective configuration and where it came from
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Keep stdout for results; library chatter stays at warn. Override via RUST_LOG.
                "warn,marquee=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut loader = ConfigLoader::from_process_env()?;
    if let Some(path) = cli.config.as_ref() {
        loader = loader.var(CONFIG_PATH_VAR, path.display().to_string());
    }
    let (config, source) = loader.load()?;
    debug!("Loaded config from {:?}", source);

    match cli.command {
        Command::Browse(args) => commands::browse::run(&config, args).await,
        Command::Watch(args) => commands::watch::run(&config, args).await,
        Command::Config => commands::config::run(&config, &source),
    }
}
