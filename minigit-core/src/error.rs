use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error at {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File does not exist in the project directory: {0}")]
    FileNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Not a minigit repository (missing {})", .0.display())]
    NotInitialized(PathBuf),

    #[error("Clock error: {0}")]
    Clock(String),
}

impl Error {
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileIo {
            path: path.into(),
            source,
        }
    }
}
