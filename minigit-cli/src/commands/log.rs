use anyhow::{Context, Result};
use colored::Colorize;
use minigit_core::History;
use std::path::Path;

pub fn run(root: &Path, limit: Option<usize>, json: bool) -> Result<()> {
    let repo = super::open_repository(root)?;
    let history = History::open(&repo).context("Failed to load commit history")?;

    if json {
        println!("{}", history.to_json(limit)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("{}", "No commits have been made yet.".yellow());
        return Ok(());
    }

    println!("{}", "Commit History".bold().cyan());
    println!();

    let to_show = limit.unwrap_or(history.len()).min(history.len());

    for record in history.records().iter().take(to_show) {
        if !record.is_well_formed() {
            println!("{}", "(damaged history entry)".red());
        }
        println!("{}: {}", "Commit ID".yellow().bold(), record.id.yellow());
        println!("{}: {}", "Timestamp".bold(), record.timestamp);
        println!("{}: {}", "Author".bold(), record.author);
        println!("{}: {}", "Message".bold(), record.message);
        println!();
    }

    if history.len() > to_show {
        println!(
            "{}",
            format!("... and {} more commits", history.len() - to_show).dimmed()
        );
        println!("Use {} to see more", "--limit N".cyan());
    }

    Ok(())
}
