//! Typed repositories over the raw document store.
//!
//! # Responsibility
//! - Encode and decode resource documents.
//! - Create first-run defaults lazily on read.
//! - Apply delta updates and bulk replacements as full-document rewrites.
//!
//! # Invariants
//! - Profile read failures surface to the caller.
//! - Map resource reads never fail; they degrade to an empty map and log.
//! - Delta updates are read-modify-write without locking; concurrent writers
//!   to one resource can lose updates (last writer wins).

use crate::store::{Resource, StoreError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod map_repo;
pub mod profile_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for resource persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// Stored document exists but cannot be decoded.
    InvalidData {
        resource: Resource,
        message: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData { resource, message } => write!(
                f,
                "invalid {} document: {message}",
                resource.file_name()
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData { .. } => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Pretty JSON encoding shared by every stored document.
pub(crate) fn encode_document<T: Serialize>(
    resource: Resource,
    value: &T,
) -> RepoResult<String> {
    serde_json::to_string_pretty(value).map_err(|err| RepoError::InvalidData {
        resource,
        message: err.to_string(),
    })
}
