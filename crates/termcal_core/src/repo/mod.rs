//! Note store persistence.
//!
//! # Responsibility
//! - Define the load/save contract for the whole-file note snapshot.
//! - Keep JSON and filesystem details out of the service layer.
//!
//! # Invariants
//! - Once the store file exists it always holds a valid JSON object.
//! - A corrupt file is reported, never overwritten or repaired.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod note_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for note store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Filesystem failure while reading, writing or creating directories.
    Io { path: PathBuf, source: io::Error },
    /// File exists but is not a JSON object of `YYYY-MM-DD` to text.
    Corrupt { path: PathBuf, reason: String },
    /// Snapshot could not be serialized.
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "note store I/O at `{}`: {source}", path.display()),
            Self::Corrupt { path, reason } => {
                write!(f, "note store `{}` is corrupt: {reason}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize note store: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
