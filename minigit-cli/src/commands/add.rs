use anyhow::Result;
use colored::Colorize;
use minigit_core::{AddOutcome, Error, StagingManager};
use std::path::Path;

pub fn run(root: &Path, filename: &str) -> Result<()> {
    let repo = super::open_repository(root)?;

    match StagingManager::new(&repo).add(filename) {
        Ok(AddOutcome::Staged { bytes }) => {
            println!("{} {}", "Added new file to staging:".green(), filename.bold());
            println!("  {}: {}", "Size".bold(), bytes);
        }
        Ok(AddOutcome::Appended { bytes }) => {
            println!(
                "{} {}",
                "Appended content to file in staging:".yellow(),
                filename.bold()
            );
            println!("  {}: {}", "Bytes appended".bold(), bytes);
        }
        Ok(AddOutcome::NothingToAppend) => {
            println!(
                "{} {}",
                "No new content to append for:".dimmed(),
                filename
            );
        }
        Err(Error::FileNotFound(name)) => {
            println!(
                "{} {}",
                "File does not exist in the project directory:".red(),
                name
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
