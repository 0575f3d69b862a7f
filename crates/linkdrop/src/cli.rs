//! Command-line interface for linkdrop.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Linkdrop command-line interface.
#[derive(Parser, Debug)]
#[command(name = "linkdrop")]
#[command(about = "Telegram bot that shares media through slug deep links", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (polling or webhook, per configuration)
    Serve {
        /// Configuration file (defaults to ./linkdrop.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep mappings in memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },

    /// Create the mapping table and exit
    InitDb {
        /// Configuration file (defaults to ./linkdrop.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
