//! Spor CLI entry point.

use anyhow::Result;
use clap::Parser;
use spor::cli::{commands, Cli, Commands};
use spor::config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("spor={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    match cli.command {
        Commands::Ask {
            video,
            question,
            chunk_size,
            k,
            model,
            sources,
        } => {
            commands::run_ask(&video, &question, chunk_size, k, model, sources, settings).await?;
        }

        Commands::Search {
            video,
            query,
            chunk_size,
            k,
        } => {
            commands::run_search(&video, &query, chunk_size, k, settings).await?;
        }

        Commands::Fetch { url, prefer, force } => {
            std::fs::create_dir_all(settings.temp_dir())?;
            commands::run_fetch(&url, prefer, force, settings).await?;
        }

        Commands::Summarise { url, prefer, model } => {
            std::fs::create_dir_all(settings.temp_dir())?;
            commands::run_summarise(&url, prefer, model, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, config_path, settings)?;
        }
    }

    Ok(())
}
