//! # minigit-core
//!
//! Core library for minigit - a minimal local version-control tool.
//!
//! Files move from the working directory into a flat staging area, staged
//! files are snapshotted into timestamp-named commit directories, and commit
//! metadata is kept in an append-only history log.

pub mod error;
pub mod fs;
pub mod hash;
pub mod history;
pub mod models;
pub mod repository;
pub mod snapshot;
pub mod staging;
pub mod status;

pub use error::{Error, Result};
pub use hash::{Blake3Hasher, ContentDigest, ContentHasher, HashAlgorithm, Sha256Hasher};
pub use history::{History, HistoryStore};
pub use models::CommitRecord;
pub use repository::{InitOutcome, Repository};
pub use snapshot::{CommitSummary, SnapshotEngine};
pub use staging::{AddOutcome, StagingManager};
pub use status::{StatusEntry, StatusKind, StatusReport, StatusReporter};
