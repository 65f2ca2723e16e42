//! In-memory document store for tests and ephemeral runs.

use super::{DocumentStore, Resource, StoreError, StoreResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    documents: BTreeMap<Resource, String>,
    failing_reads: BTreeSet<Resource>,
    failing_writes: BTreeSet<Resource>,
    writes: usize,
}

/// Thread-safe map of resource documents.
///
/// Individual resources can be switched into a failing state to exercise
/// storage error paths.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: Mutex<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one document without counting it as a write.
    pub fn with_document(self, resource: Resource, content: impl Into<String>) -> Self {
        self.lock().documents.insert(resource, content.into());
        self
    }

    pub fn fail_reads(&self, resource: Resource) {
        self.lock().failing_reads.insert(resource);
    }

    pub fn fail_writes(&self, resource: Resource) {
        self.lock().failing_writes.insert(resource);
    }

    /// Number of successful writes since construction.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Raw document content without going through failure injection.
    pub fn snapshot(&self, resource: Resource) -> Option<String> {
        self.lock().documents.get(&resource).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self, resource: Resource) -> StoreResult<Option<String>> {
        let inner = self.lock();
        if inner.failing_reads.contains(&resource) {
            return Err(StoreError::Unavailable(resource));
        }
        Ok(inner.documents.get(&resource).cloned())
    }

    fn save(&self, resource: Resource, content: &str) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.failing_writes.contains(&resource) {
            return Err(StoreError::Unavailable(resource));
        }
        inner.documents.insert(resource, content.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn create_if_absent(&self, resource: Resource, content: &str) -> StoreResult<bool> {
        let mut inner = self.lock();
        if inner.documents.contains_key(&resource) {
            return Ok(false);
        }
        if inner.failing_writes.contains(&resource) {
            return Err(StoreError::Unavailable(resource));
        }
        inner.documents.insert(resource, content.to_string());
        inner.writes += 1;
        Ok(true)
    }
}
