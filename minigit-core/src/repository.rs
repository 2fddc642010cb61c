use crate::error::{Error, Result};
use crate::fs;
use std::path::{Path, PathBuf};

pub const REPO_DIR: &str = ".mygit";
pub const COMMITS_DIR: &str = "commits";
pub const STAGING_DIR: &str = "staging";
pub const HISTORY_FILE: &str = "commit_history.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
    repo_dir: PathBuf,
}

impl Repository {
    fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let repo_dir = root.join(REPO_DIR);
        Self { root, repo_dir }
    }

    pub fn init(root: impl Into<PathBuf>) -> Result<(Self, InitOutcome)> {
        let repo = Self::at(root);

        if repo.repo_dir.exists() {
            return Ok((repo, InitOutcome::AlreadyExists));
        }

        fs::create_directory(&repo.repo_dir)?;
        fs::create_directory(&repo.commits_dir())?;
        fs::create_directory(&repo.staging_dir())?;
        tracing::info!("Initialized repository at {:?}", repo.repo_dir);

        Ok((repo, InitOutcome::Created))
    }

    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let repo = Self::at(root);

        for dir in [repo.commits_dir(), repo.staging_dir()] {
            if !dir.is_dir() {
                return Err(Error::NotInitialized(dir));
            }
        }

        Ok(repo)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    pub fn commits_dir(&self) -> PathBuf {
        self.repo_dir.join(COMMITS_DIR)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.repo_dir.join(STAGING_DIR)
    }

    pub fn history_path(&self) -> PathBuf {
        self.repo_dir.join(HISTORY_FILE)
    }

    pub fn commit_dir(&self, commit_id: &str) -> PathBuf {
        self.commits_dir().join(commit_id)
    }

    pub fn working_path(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.root.join(filename))
    }

    pub fn staged_path(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.staging_dir().join(filename))
    }

    pub fn staged_files(&self) -> Result<Vec<String>> {
        regular_files(&self.staging_dir())
    }
}

pub(crate) fn regular_files(dir: &Path) -> Result<Vec<String>> {
    Ok(fs::list_directory(dir)?
        .iter()
        .filter(|path| fs::file_exists(path))
        .filter_map(|path| fs::file_name(path))
        .collect())
}

pub fn validate_filename(filename: &str) -> Result<()> {
    use std::path::Component;

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name != REPO_DIR => Ok(()),
        _ => Err(Error::InvalidPath(filename.to_string())),
    }
}
