//! Filesystem-backed document store.
//!
//! # Invariants
//! - Every write lands through a sibling temp file and a rename, so readers
//!   never observe a half-written document.
//! - The user directory is created on first write.

use super::{DocumentStore, Resource, StoreError, StoreResult};
use log::debug;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Stores each resource as `<dir>/<resource>.json`.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
}

impl FsDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the backing file for `resource`.
    pub fn path_of(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.file_name())
    }

    fn staged(&self, resource: Resource, content: &str) -> StoreResult<NamedTempFile> {
        let io_err = |source| StoreError::Io {
            resource,
            operation: "write",
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        file.write_all(content.as_bytes()).map_err(io_err)?;
        file.as_file().sync_all().map_err(io_err)?;
        Ok(file)
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, resource: Resource) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_of(resource)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                resource,
                operation: "read",
                source,
            }),
        }
    }

    fn save(&self, resource: Resource, content: &str) -> StoreResult<()> {
        let staged = self.staged(resource, content)?;
        staged
            .persist(self.path_of(resource))
            .map_err(|err| StoreError::Io {
                resource,
                operation: "write",
                source: err.error,
            })?;
        debug!(
            "event=document_write module=store status=ok resource={} bytes={}",
            resource,
            content.len()
        );
        Ok(())
    }

    fn create_if_absent(&self, resource: Resource, content: &str) -> StoreResult<bool> {
        if self.path_of(resource).exists() {
            return Ok(false);
        }
        let staged = self.staged(resource, content)?;
        match staged.persist_noclobber(self.path_of(resource)) {
            Ok(_) => {
                debug!(
                    "event=document_create module=store status=ok resource={}",
                    resource
                );
                Ok(true)
            }
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(StoreError::Io {
                resource,
                operation: "create",
                source: err.error,
            }),
        }
    }
}
