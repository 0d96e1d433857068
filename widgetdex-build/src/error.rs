use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while scanning widget sources or writing artifacts.
#[derive(Debug, Error)]
pub enum Error {
    /// A discovered source file could not be read. Aborts the whole run.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parent directory of an artifact could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template or hover data table could not be parsed.
    #[error("invalid template data in {origin}: {source}")]
    Templates {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// JSON serialization of an artifact failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
