use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{GoalCommands, SettingsCommands, SyncCommands};

/// Lodestar keeps a small set of goals in focus.
///
/// Goals are scored from motivation, urgency and deadline proximity, and only
/// the highest scoring ones are active at a time. Goal sets can be exported
/// and merged between devices without a server.
#[derive(Parser)]
#[command(version, about, name = "lode")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/lodestar/lodestar.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Lodestar CLI
///
/// Running `lode` without a command lists goals.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage goals
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Exchange goal sets with other devices
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },
}
