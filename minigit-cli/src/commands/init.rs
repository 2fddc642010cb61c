use anyhow::Result;
use colored::Colorize;
use minigit_core::{InitOutcome, Repository};
use std::path::Path;

pub fn run(root: &Path) -> Result<()> {
    let (repo, outcome) = Repository::init(root)?;

    match outcome {
        InitOutcome::Created => {
            println!("{}", "✓ Repository initialized.".green().bold());
            println!("   {}: {:?}", "Location".bold(), repo.repo_dir());
        }
        InitOutcome::AlreadyExists => {
            println!("{}", "Repository already exists.".yellow());
        }
    }

    Ok(())
}
