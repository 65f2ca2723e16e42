//! Raw document storage for the four user resources.
//!
//! # Responsibility
//! - Define the storage collaborator every repository reads and writes through.
//! - Name the resources and their on-disk file names.
//!
//! # Invariants
//! - Documents are stored and returned as raw UTF-8 text, byte for byte.
//! - Each resource is independent; there is no cross-resource transaction.
//! - Writes replace the whole document.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod fs_store;
mod memory_store;

pub use fs_store::FsDocumentStore;
pub use memory_store::MemoryDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// One persisted user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Profile,
    Progress,
    Notes,
    Revision,
}

impl Resource {
    /// All resources in archive order.
    pub const ALL: [Resource; 4] = [
        Resource::Profile,
        Resource::Progress,
        Resource::Notes,
        Resource::Revision,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Progress => "progress",
            Self::Notes => "notes",
            Self::Revision => "revision",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Profile => "profile.json",
            Self::Progress => "progress.json",
            Self::Notes => "notes.json",
            Self::Revision => "revision.json",
        }
    }

    /// Parses a resource name as used in routes (`profile`, `progress`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.name() == value.trim())
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage-layer failure.
#[derive(Debug)]
pub enum StoreError {
    Io {
        resource: Resource,
        operation: &'static str,
        source: std::io::Error,
    },
    /// Injected by test stores to exercise failure paths.
    Unavailable(Resource),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io {
                resource,
                operation,
                source,
            } => write!(
                f,
                "failed to {operation} {}: {source}",
                resource.file_name()
            ),
            Self::Unavailable(resource) => {
                write!(f, "storage unavailable for {}", resource.file_name())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Unavailable(_) => None,
        }
    }
}

/// Storage collaborator for raw resource documents.
///
/// Implementations must be shareable across request handlers.
pub trait DocumentStore: Send + Sync {
    /// Returns the raw document, or `None` when it does not exist yet.
    fn load(&self, resource: Resource) -> StoreResult<Option<String>>;

    /// Replaces the document with `content`.
    fn save(&self, resource: Resource, content: &str) -> StoreResult<()>;

    /// Writes `content` only when no document exists.
    ///
    /// Returns `true` when this call created the document.
    fn create_if_absent(&self, resource: Resource, content: &str) -> StoreResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::Resource;

    #[test]
    fn resource_names_round_trip() {
        for resource in Resource::ALL {
            assert_eq!(Resource::parse(resource.name()), Some(resource));
        }
        assert_eq!(Resource::parse("settings"), None);
        assert_eq!(Resource::Notes.file_name(), "notes.json");
    }
}
