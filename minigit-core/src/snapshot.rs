use crate::error::{Error, Result};
use crate::fs;
use crate::hash::{digest_file, ContentHasher};
use crate::history::History;
use crate::models::{format_timestamp, next_commit_id, validate_field, CommitRecord};
use crate::repository::{regular_files, Repository};
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub record: CommitRecord,
    pub files: Vec<String>,
    pub synced: Vec<String>,
}

pub struct SnapshotEngine<'a> {
    repo: &'a Repository,
    hasher: &'a dyn ContentHasher,
}

impl<'a> SnapshotEngine<'a> {
    pub fn new(repo: &'a Repository, hasher: &'a dyn ContentHasher) -> Self {
        Self { repo, hasher }
    }

    pub fn commit(
        &self,
        history: &mut History,
        author: &str,
        message: &str,
    ) -> Result<CommitSummary> {
        validate_field("author", author)?;
        validate_field("message", message)?;

        let now = Utc::now();
        let mut sequence = next_commit_id(now, history.latest_sequence())?;
        while self.repo.commit_dir(&sequence.to_string()).exists() {
            sequence = sequence.checked_add(1).ok_or_else(|| {
                Error::Clock(format!("commit id {} cannot be advanced", sequence))
            })?;
        }
        let commit_id = sequence.to_string();

        let synced = self.sync_staged_files()?;

        let commit_dir = self.repo.commit_dir(&commit_id);
        std::fs::create_dir(&commit_dir).map_err(|e| Error::file_io(&commit_dir, e))?;

        let files = self.repo.staged_files()?;
        let staging_dir = self.repo.staging_dir();
        for name in &files {
            fs::copy_file(&staging_dir.join(name), &commit_dir.join(name), true)?;
            debug!("Snapshotted {} into {}", name, commit_id);
        }

        // Recorded only once every staged file is in the snapshot.
        let record = CommitRecord::new(commit_id, format_timestamp(now), author, message);
        history.append(record.clone())?;

        info!(
            "Committed {} with {} file(s), {} refreshed from working directory",
            record.id,
            files.len(),
            synced.len()
        );

        Ok(CommitSummary {
            record,
            files,
            synced,
        })
    }

    fn sync_staged_files(&self) -> Result<Vec<String>> {
        let mut synced = Vec::new();

        for name in regular_files(self.repo.root())? {
            let staged = self.repo.staging_dir().join(&name);
            if !fs::file_exists(&staged) {
                continue;
            }

            let working = self.repo.root().join(&name);
            if digest_file(self.hasher, &staged)? != digest_file(self.hasher, &working)? {
                fs::copy_file(&working, &staged, true)?;
                debug!("Refreshed staged {} from working directory", name);
                synced.push(name);
            }
        }

        Ok(synced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Blake3Hasher, Sha256Hasher};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let (repo, _) = Repository::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn stage(dir: &TempDir, repo: &Repository, name: &str, content: &[u8]) {
        std::fs::write(dir.path().join(name), content).unwrap();
        std::fs::copy(dir.path().join(name), repo.staging_dir().join(name)).unwrap();
    }

    #[test]
    fn test_commit_snapshots_staging() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"hello");
        stage(&dir, &repo, "b.txt", b"world");
        let mut history = History::open(&repo).unwrap();

        let summary = SnapshotEngine::new(&repo, &Sha256Hasher)
            .commit(&mut history, "alice", "first")
            .unwrap();

        assert_eq!(summary.files, vec!["a.txt", "b.txt"]);
        assert!(summary.synced.is_empty());
        let commit_dir = repo.commit_dir(&summary.record.id);
        assert_eq!(std::fs::read(commit_dir.join("a.txt")).unwrap(), b"hello");
        assert_eq!(std::fs::read(commit_dir.join("b.txt")).unwrap(), b"world");

        let last = history.last().unwrap();
        assert_eq!(last.author, "alice");
        assert_eq!(last.message, "first");
        assert!(last.is_well_formed());
    }

    #[test]
    fn test_commit_refreshes_modified_staged_files() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"old");
        std::fs::write(dir.path().join("a.txt"), b"new").unwrap();
        let mut history = History::open(&repo).unwrap();

        let summary = SnapshotEngine::new(&repo, &Blake3Hasher)
            .commit(&mut history, "alice", "refresh")
            .unwrap();

        assert_eq!(summary.synced, vec!["a.txt"]);
        assert_eq!(std::fs::read(repo.staging_dir().join("a.txt")).unwrap(), b"new");
        let snapshot = repo.commit_dir(&summary.record.id).join("a.txt");
        assert_eq!(std::fs::read(snapshot).unwrap(), b"new");
    }

    #[test]
    fn test_commit_ignores_unstaged_files() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"tracked");
        std::fs::write(dir.path().join("untracked.txt"), b"ignored").unwrap();
        let mut history = History::open(&repo).unwrap();

        let summary = SnapshotEngine::new(&repo, &Sha256Hasher)
            .commit(&mut history, "alice", "partial")
            .unwrap();

        assert_eq!(summary.files, vec!["a.txt"]);
        assert!(!repo.staging_dir().join("untracked.txt").exists());
    }

    #[test]
    fn test_commit_ids_strictly_increase() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"x");
        let mut history = History::open(&repo).unwrap();
        let engine = SnapshotEngine::new(&repo, &Sha256Hasher);

        let mut previous = 0u128;
        for i in 0..5 {
            let summary = engine
                .commit(&mut history, "alice", &format!("commit {}", i))
                .unwrap();
            let id = summary.record.sequence().unwrap();
            assert!(id > previous);
            previous = id;
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_commit_with_empty_staging() {
        let (_dir, repo) = setup();
        let mut history = History::open(&repo).unwrap();

        let summary = SnapshotEngine::new(&repo, &Sha256Hasher)
            .commit(&mut history, "alice", "empty")
            .unwrap();

        assert!(summary.files.is_empty());
        assert!(repo.commit_dir(&summary.record.id).is_dir());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_commit_rejects_delimiter_in_message() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"x");
        let mut history = History::open(&repo).unwrap();

        let result =
            SnapshotEngine::new(&repo, &Sha256Hasher).commit(&mut history, "alice", "a|b");

        assert!(matches!(result, Err(Error::InvalidField { .. })));
        assert!(history.is_empty());
        assert!(std::fs::read_dir(repo.commits_dir()).unwrap().next().is_none());
    }

    #[test]
    fn test_commit_after_maximum_id_fails_cleanly() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"x");
        std::fs::write(repo.history_path(), format!("{}|ts|bob|m\n", u128::MAX)).unwrap();
        let mut history = History::open(&repo).unwrap();

        let result =
            SnapshotEngine::new(&repo, &Sha256Hasher).commit(&mut history, "alice", "overflow");

        assert!(matches!(result, Err(Error::Clock(_))));
        assert_eq!(history.len(), 1);
        assert!(std::fs::read_dir(repo.commits_dir()).unwrap().next().is_none());
    }

    #[test]
    fn test_commit_id_collision_at_maximum_fails_cleanly() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"x");
        let taken = u128::MAX;
        std::fs::create_dir(repo.commit_dir(&taken.to_string())).unwrap();
        std::fs::write(
            repo.history_path(),
            format!("{}|ts|bob|m\n", taken - 1),
        )
        .unwrap();
        let mut history = History::open(&repo).unwrap();

        let result =
            SnapshotEngine::new(&repo, &Sha256Hasher).commit(&mut history, "alice", "overflow");

        assert!(matches!(result, Err(Error::Clock(_))));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_commit_is_persisted() {
        let (dir, repo) = setup();
        stage(&dir, &repo, "a.txt", b"x");
        {
            let mut history = History::open(&repo).unwrap();
            SnapshotEngine::new(&repo, &Sha256Hasher)
                .commit(&mut history, "bob", "saved")
                .unwrap();
        }

        let reloaded = History::open(&repo).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records()[0].author, "bob");
    }
}
