//! Command-line interface argument parsing for habit-tui.
//!
//! Two subcommands:
//! - `habit-tui show` launches the TUI dashboard
//! - `habit-tui stats --month June` prints a month's aggregates to stdout

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use crate::data::dates;

/// A Rust-based Terminal User Interface for tracking daily habits,
/// journaling, and sleep.
#[derive(Parser, Debug)]
#[command(name = "habit-tui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the TUI dashboard
    Show {
        /// Month to open on (e.g., "June"); defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Year to open on; defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,

        /// Path to the data directory
        /// Defaults to $HABIT_TUI_DIR, then the platform data dir
        #[arg(long)]
        data_dir: Option<String>,
    },

    /// Print monthly statistics without launching the TUI
    Stats {
        /// Month to report on (e.g., "June")
        #[arg(short, long)]
        month: String,

        /// Year to report on; defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,

        /// Path to the data directory
        /// Defaults to $HABIT_TUI_DIR, then the platform data dir
        #[arg(long)]
        data_dir: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl AppConfig {
    /// Create AppConfig from the `show` subcommand's arguments
    pub fn from_show_command(
        month: Option<String>,
        year: Option<i32>,
        data_dir: Option<String>,
    ) -> Result<Self> {
        let month = match month {
            Some(name) => match dates::month_from_name(&name) {
                Some(number) => Some(number),
                None => bail!("Unknown month name: `{name}`"),
            },
            None => None,
        };

        Ok(AppConfig {
            data_dir: resolve_data_dir(data_dir),
            month,
            year,
        })
    }
}

/// Determine the data directory: explicit flag, then the HABIT_TUI_DIR
/// environment variable, then the platform data dir.
pub fn resolve_data_dir(data_dir: Option<String>) -> PathBuf {
    data_dir.map(PathBuf::from).unwrap_or_else(|| {
        if let Ok(dir) = std::env::var("HABIT_TUI_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("habit-tui")
        }
    })
}
