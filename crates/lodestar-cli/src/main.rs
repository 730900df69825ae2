//! Lodestar CLI Application
//!
//! Command-line interface for the lodestar goal tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use lodestar_core::TrackerBuilder;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(tracker, renderer);

    info!("Lodestar started");

    match command {
        Some(Commands::Goal { command }) => cli.handle_goal_command(command).await,
        Some(Commands::Settings { command }) => cli.handle_settings_command(command).await,
        Some(Commands::Sync { command }) => cli.handle_sync_command(command).await,
        None => cli.list_goals().await,
    }
}
