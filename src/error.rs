//! Error types for post loading

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::content::FrontMatterError;

/// Errors produced while reading, parsing or rendering posts
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("Invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unknown highlight theme: {0}")]
    UnknownTheme(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error comes from a file or directory that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
