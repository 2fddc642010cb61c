use crate::error::Result;
use crate::fs;
use crate::hash::{digest_file, ContentHasher};
use crate::repository::{regular_files, Repository};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Uncommitted,
    Modified,
}

impl StatusKind {
    pub fn as_str(&self) -> &str {
        match self {
            StatusKind::Uncommitted => "uncommitted",
            StatusKind::Modified => "modified and uncommitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub filename: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub entries: Vec<StatusEntry>,
    pub staging_empty: bool,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.staging_empty || self.entries.is_empty()
    }
}

/// Only staged-versus-working content is compared; drift between a staged copy
/// and its committed snapshot is not detected.
pub struct StatusReporter<'a> {
    repo: &'a Repository,
    hasher: &'a dyn ContentHasher,
}

impl<'a> StatusReporter<'a> {
    pub fn new(repo: &'a Repository, hasher: &'a dyn ContentHasher) -> Self {
        Self { repo, hasher }
    }

    pub fn report(&self) -> Result<StatusReport> {
        let committed = self.committed_files()?;
        let staged = self.repo.staged_files()?;
        let mut report = StatusReport {
            entries: Vec::new(),
            staging_empty: staged.is_empty(),
        };

        for filename in staged {
            let kind = if !committed.contains(&filename) {
                Some(StatusKind::Uncommitted)
            } else if self.differs_from_working_copy(&filename)? {
                Some(StatusKind::Modified)
            } else {
                None
            };

            if let Some(kind) = kind {
                report.entries.push(StatusEntry { filename, kind });
            }
        }

        debug!(
            "Status: {} staged file(s) need attention, {} name(s) in commit history",
            report.entries.len(),
            committed.len()
        );
        Ok(report)
    }

    pub fn committed_files(&self) -> Result<BTreeSet<String>> {
        let mut committed = BTreeSet::new();

        for commit_dir in fs::list_directory(&self.repo.commits_dir())? {
            if commit_dir.is_dir() {
                committed.extend(regular_files(&commit_dir)?);
            }
        }

        Ok(committed)
    }

    fn differs_from_working_copy(&self, filename: &str) -> Result<bool> {
        let working = self.repo.working_path(filename)?;
        if !fs::file_exists(&working) {
            return Ok(true);
        }

        let staged = self.repo.staged_path(filename)?;
        Ok(digest_file(self.hasher, &staged)? != digest_file(self.hasher, &working)?)
    }
}
