//! Persistence layer for the résumé document.
//!
//! # Responsibility
//! - Define the durable key-value slot contract and its implementations.
//! - Map the document to and from one slot with default-template fallback.
//!
//! # Invariants
//! - Slot implementations store opaque UTF-8 text; they never parse it.
//! - Document loading never surfaces an error to the caller.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document_repo;
pub mod slot_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot access and document encoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
