//! habit-tui: A Rust-based Terminal User Interface for daily habit and
//! wellness tracking.
//!
//! Tracks boolean habit completions, free-text journal entries, and
//! nightly sleep hours per calendar day, all persisted locally, with
//! derived monthly statistics.

mod app;
mod cli;
mod data;
mod ui;

use anyhow::Result;
use cli::{AppConfig, Cli, Commands};
use data::{HabitStore, Storage, dates};

fn main() -> Result<()> {
    env_logger::init();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Show {
            month,
            year,
            data_dir,
        } => {
            let config = AppConfig::from_show_command(month, year, data_dir)?;

            // Run the TUI application
            app::run(config)?;
        }
        Commands::Stats {
            month,
            year,
            data_dir,
        } => {
            print_stats(&month, year, data_dir)?;
        }
    }

    Ok(())
}

/// Print one month's statistics to stdout
fn print_stats(month: &str, year: Option<i32>, data_dir: Option<String>) -> Result<()> {
    use chrono::Datelike;

    let year = year.unwrap_or_else(|| dates::today().year());
    let storage = Storage::new(cli::resolve_data_dir(data_dir));
    let store = HabitStore::new(storage);

    let stats = store.monthly_stats_for_name(month, year)?;
    let month_number = dates::month_from_name(month).unwrap_or(0);

    println!("{} {year}", dates::month_name(month_number));
    println!(
        "  Habits   {}/{} completed",
        stats.completed_habits, stats.total_habits
    );
    println!("  Sleep    {:.1} h average", stats.average_sleep);
    println!("  Journal  {} days with entries", stats.journal_days);

    Ok(())
}
