//! Command-line interface for pattern_recall.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pattern Recall - memorise the flashing cells, then reproduce them
#[derive(Parser, Debug)]
#[command(name = "pattern_recall")]
#[command(about = "Visual memory puzzle on a 5x5 grid", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Override the countdown unit in milliseconds
        #[arg(long)]
        tick_millis: Option<u64>,
    },

    /// Print every level and its pattern
    Levels,

    /// Replay a JSON array of commands and print the final state
    Script {
        /// File holding the commands
        file: PathBuf,
    },
}
