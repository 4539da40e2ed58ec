//! Store persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the whole-store save/load contract.
//! - Keep file I/O and document encoding behind one boundary.
//!
//! # Invariants
//! - Every save writes the entire store; there is no incremental write.
//! - A failed load returns no store at all.
//!
//! # See also
//! - `crate::document` for the encoded shape.

use crate::document::DocumentError;
use crate::model::store::ProjectStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod file_repo;
pub mod memory_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for store save/load.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying read/write failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No document exists yet at the configured location.
    NotFound(PathBuf),
    /// Document could not be encoded or decoded.
    Document(DocumentError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "store I/O failed at `{}`: {source}", path.display()),
            Self::NotFound(path) => write!(f, "store document not found: {}", path.display()),
            Self::Document(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound(_) => None,
            Self::Document(err) => Some(err),
        }
    }
}

impl From<DocumentError> for RepoError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

/// Repository interface for whole-store persistence.
pub trait StoreRepository {
    fn save(&self, store: &ProjectStore) -> RepoResult<()>;
    fn load(&self) -> RepoResult<ProjectStore>;
}
