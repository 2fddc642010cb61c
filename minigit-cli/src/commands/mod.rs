pub mod add;
pub mod commit;
pub mod init;
pub mod log;
pub mod status;

use anyhow::{Context, Result};
use colored::Colorize;
use minigit_core::{Error, Repository};
use std::path::{Path, PathBuf};

pub fn resolve_root(custom_root: Option<PathBuf>) -> Result<PathBuf> {
    match custom_root {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Cannot determine the current directory"),
    }
}

/// Opens the repository, pointing the user at `minigit init` when there is none.
pub fn open_repository(root: &Path) -> Result<Repository> {
    match Repository::open(root) {
        Ok(repo) => Ok(repo),
        Err(e @ Error::NotInitialized(_)) => {
            println!("{}", "No minigit repository found".red());
            println!("Run {} to create one", "minigit init".cyan());
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
