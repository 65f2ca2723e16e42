//! Repositories for the keyed map resources (progress, revision, notes).
//!
//! # Responsibility
//! - Lazily create `{ "result": {} }` on first read.
//! - Degrade unreadable documents to an empty map without touching the file.
//! - Apply single-key deltas and whole-map replacements.

use super::{encode_document, RepoResult};
use crate::model::status::{FlagSet, NoteMap, ResultDocument};
use crate::store::{DocumentStore, Resource};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Repository for completion or revision flags.
pub type FlagRepository<'s> = MapRepository<'s, FlagSet>;
/// Repository for per-problem notes.
pub type NoteRepository<'s> = MapRepository<'s, NoteMap>;

/// Repository over one `{ "result": map }` document.
pub struct MapRepository<'s, T> {
    store: &'s dyn DocumentStore,
    resource: Resource,
    _marker: PhantomData<T>,
}

impl<'s> MapRepository<'s, FlagSet> {
    /// Completed-problem flags (`progress.json`).
    pub fn progress(store: &'s dyn DocumentStore) -> Self {
        Self::for_resource(store, Resource::Progress)
    }

    /// Needs-revision flags (`revision.json`).
    pub fn revision(store: &'s dyn DocumentStore) -> Self {
        Self::for_resource(store, Resource::Revision)
    }

    /// Sets or clears one flag and rewrites the document.
    pub fn set_flag(&self, problem_id: &str, flagged: bool) -> RepoResult<FlagSet> {
        let mut flags = self.load_or_default();
        flags.set(problem_id, flagged);
        self.write(&flags)?;
        Ok(flags)
    }
}

impl<'s> MapRepository<'s, NoteMap> {
    /// Per-problem notes (`notes.json`).
    pub fn notes(store: &'s dyn DocumentStore) -> Self {
        Self::for_resource(store, Resource::Notes)
    }

    /// Stores a trimmed note, or removes it when blank, and rewrites the document.
    pub fn set_note(&self, problem_id: &str, note: &str) -> RepoResult<NoteMap> {
        let mut notes = self.load_or_default();
        notes.set(problem_id, note);
        self.write(&notes)?;
        Ok(notes)
    }
}

impl<'s, T> MapRepository<'s, T>
where
    T: Serialize + DeserializeOwned + Default,
{
    fn for_resource(store: &'s dyn DocumentStore, resource: Resource) -> Self {
        Self {
            store,
            resource,
            _marker: PhantomData,
        }
    }

    /// Returns the stored map, creating an empty document on first access.
    ///
    /// Never fails: creation or read problems are logged and an empty map
    /// is returned.
    pub fn read(&self) -> T {
        match encode_document(self.resource, &ResultDocument::new(T::default())) {
            Ok(default_doc) => match self.store.create_if_absent(self.resource, &default_doc) {
                Ok(true) => info!(
                    "event=document_create module=repo status=ok resource={}",
                    self.resource
                ),
                Ok(false) => {}
                Err(err) => warn!(
                    "event=document_create module=repo status=degraded resource={} error={}",
                    self.resource, err
                ),
            },
            Err(err) => warn!(
                "event=document_create module=repo status=degraded resource={} error={}",
                self.resource, err
            ),
        }
        self.load_or_default()
    }

    /// Replaces the whole map.
    pub fn write(&self, value: &T) -> RepoResult<()> {
        let content = encode_document(self.resource, &ResultDocument::new(value))?;
        self.store.save(self.resource, &content)?;
        Ok(())
    }

    fn load_or_default(&self) -> T {
        let raw = match self.store.load(self.resource) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!(
                    "event=document_read module=repo status=degraded resource={} error={}",
                    self.resource, err
                );
                return T::default();
            }
        };

        match serde_json::from_str::<ResultDocument<T>>(&raw) {
            Ok(document) => document.result,
            Err(err) => {
                warn!(
                    "event=document_decode module=repo status=degraded resource={} line={} column={}",
                    self.resource,
                    err.line(),
                    err.column()
                );
                T::default()
            }
        }
    }
}
