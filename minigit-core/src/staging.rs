use crate::error::{Error, Result};
use crate::fs;
use crate::repository::Repository;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Staged { bytes: u64 },
    Appended { bytes: u64 },
    NothingToAppend,
}

pub struct StagingManager<'a> {
    repo: &'a Repository,
}

impl<'a> StagingManager<'a> {
    pub fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    /// Re-adding an already staged file appends to it instead of replacing it.
    pub fn add(&self, filename: &str) -> Result<AddOutcome> {
        let working = self.repo.working_path(filename)?;
        let staged = self.repo.staged_path(filename)?;

        if !fs::file_exists(&working) {
            return Err(Error::FileNotFound(filename.to_string()));
        }

        if !fs::file_exists(&staged) {
            fs::copy_file(&working, &staged, true)?;
            let bytes = std::fs::metadata(&staged)
                .map_err(|e| Error::file_io(&staged, e))?
                .len();
            info!("Staged new file {} ({} bytes)", filename, bytes);
            return Ok(AddOutcome::Staged { bytes });
        }

        let content = fs::read_all_bytes(&working)?;
        if content.is_empty() {
            debug!("Working copy of {} is empty, nothing appended", filename);
            return Ok(AddOutcome::NothingToAppend);
        }

        fs::append_file(&staged, &content)?;
        info!("Appended {} bytes to staged {}", content.len(), filename);
        Ok(AddOutcome::Appended {
            bytes: content.len() as u64,
        })
    }
}
