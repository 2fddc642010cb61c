use anyhow::Result;
use colored::Colorize;
use minigit_core::{HashAlgorithm, StatusKind, StatusReporter};
use std::path::Path;

pub fn run(root: &Path, hash: HashAlgorithm) -> Result<()> {
    let repo = super::open_repository(root)?;
    let hasher = hash.hasher();
    let report = StatusReporter::new(&repo, hasher.as_ref()).report()?;

    for entry in &report.entries {
        let label = match entry.kind {
            StatusKind::Uncommitted => "Uncommitted file:".green(),
            StatusKind::Modified => "Modified and uncommitted file:".yellow(),
        };
        println!("{} {}", label, entry.filename);
    }

    if report.is_clean() {
        println!("{}", "Nothing to commit, staging area is up to date.".green());
    } else {
        println!();
        println!(
            "Run {} to commit these changes",
            "minigit commit <author> <message>".cyan()
        );
    }

    Ok(())
}
