use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the journal storage core.
///
/// `NotFound` and `MalformedTable` are recoverable on read paths (they read
/// as an empty journal); everything else is surfaced to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed memory table {}: {reason}", .path.display())]
    MalformedTable { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid media filename: {0:?}")]
    InvalidFilename(String),

    #[error("unsupported image {filename}: {reason}")]
    UnsupportedImage { filename: String, reason: String },

    #[error("invalid config {}: {reason}", .path.display())]
    InvalidConfig { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedTable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Classify a read error: a missing file becomes `NotFound`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::ReadFailure { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
