use crate::error::{Error, Result};
use crate::fs;
use crate::models::CommitRecord;
use crate::repository::Repository;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct HistoryStore {
    repo_dir: PathBuf,
    log_path: PathBuf,
}

impl HistoryStore {
    pub fn new(repo: &Repository) -> Self {
        Self {
            repo_dir: repo.repo_dir().to_path_buf(),
            log_path: repo.history_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn load(&self) -> Result<Vec<CommitRecord>> {
        let file = match std::fs::File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history log at {:?}, starting empty", self.log_path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::file_io(&self.log_path, e)),
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| Error::file_io(&self.log_path, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let record = CommitRecord::from_log_line(&line);
            if !record.is_well_formed() {
                warn!(
                    "Malformed history entry on line {} of {:?}: {:?}",
                    index + 1,
                    self.log_path,
                    line
                );
            }
            records.push(record);
        }

        debug!("Loaded {} commit(s) from history", records.len());
        Ok(records)
    }

    pub fn save(&self, records: &[CommitRecord]) -> Result<()> {
        fs::create_directory(&self.repo_dir)?;

        let file = std::fs::File::create(&self.log_path)
            .map_err(|e| Error::file_io(&self.log_path, e))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writeln!(writer, "{}", record.to_log_line())
                .map_err(|e| Error::file_io(&self.log_path, e))?;
        }
        writer
            .flush()
            .map_err(|e| Error::file_io(&self.log_path, e))?;

        debug!("Saved {} commit(s) to {:?}", records.len(), self.log_path);
        Ok(())
    }
}

#[derive(Debug)]
pub struct History {
    store: HistoryStore,
    records: Vec<CommitRecord>,
    dirty: bool,
}

impl History {
    pub fn open(repo: &Repository) -> Result<Self> {
        let store = HistoryStore::new(repo);
        let records = store.load()?;
        Ok(Self {
            store,
            records,
            dirty: false,
        })
    }

    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&CommitRecord> {
        self.records.last()
    }

    pub fn latest_sequence(&self) -> Option<u128> {
        self.records.iter().filter_map(CommitRecord::sequence).max()
    }

    pub fn append(&mut self, record: CommitRecord) -> Result<()> {
        self.records.push(record);
        self.dirty = true;
        if let Err(e) = self.flush() {
            self.records.pop();
            self.dirty = false;
            return Err(e);
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.store.save(&self.records)?;
        self.dirty = false;
        Ok(())
    }

    pub fn to_json(&self, limit: Option<usize>) -> Result<String> {
        let shown = limit.unwrap_or(self.records.len()).min(self.records.len());
        Ok(serde_json::to_string_pretty(&self.records[..shown])?)
    }
}

impl Drop for History {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.flush() {
                warn!("Failed to flush commit history on close: {}", e);
            }
        }
    }
}
