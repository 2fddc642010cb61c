use anyhow::{Context, Result};
use colored::Colorize;
use minigit_core::{HashAlgorithm, History, SnapshotEngine};
use std::path::Path;

pub fn run(root: &Path, hash: HashAlgorithm, author: &str, message: &str) -> Result<()> {
    let repo = super::open_repository(root)?;
    let mut history = History::open(&repo).context("Failed to load commit history")?;
    let hasher = hash.hasher();

    println!("{}", "Creating commit...".bold());

    let summary =
        SnapshotEngine::new(&repo, hasher.as_ref()).commit(&mut history, author, message)?;

    for name in &summary.synced {
        println!("  {} {}", "refreshed".yellow(), name);
    }
    println!();

    println!("{}", "✓ Commit created successfully!".green().bold());
    println!("Committed as {}", summary.record.id.yellow());
    println!("  {}: {}", "Author".bold(), summary.record.author);
    println!("  {}: {}", "Message".bold(), summary.record.message);
    println!("  {}: {}", "Date".bold(), summary.record.timestamp);
    println!("  {}: {}", "Files".bold(), summary.files.len());

    Ok(())
}
