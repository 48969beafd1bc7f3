mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salvage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest { file, quiet } => {
            commands::ingest::handle(file.as_deref(), quiet)?;
        }

        Commands::Stats { kind, sort, desc } => {
            commands::stats::handle(kind, sort, desc)?;
        }

        Commands::Rank => {
            commands::rank::handle()?;
        }

        Commands::Rates { kind } => {
            commands::rates::handle(kind)?;
        }

        Commands::Reset {
            kind,
            all,
            ranks,
            yes,
        } => {
            commands::reset::handle(kind, all, ranks, yes)?;
        }

        Commands::Configure {
            data_dir,
            enable_ranks,
            show,
        } => {
            commands::configure::handle(data_dir, enable_ranks, show)?;
        }
    }

    Ok(())
}
