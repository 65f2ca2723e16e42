//! Progress, revision and notes use-case service.
//!
//! # Responsibility
//! - Decide whether a request body is a single-problem delta or a bulk replace.
//! - Route reads and writes to the matching map repository.
//!
//! # Invariants
//! - A delta needs a non-empty `problemId` and the resource's value field with
//!   the right JSON type; anything else is a bulk replace of the whole map.
//! - Bulk replace bodies must be JSON objects.

use crate::model::status::{FlagSet, NoteMap};
use crate::repo::map_repo::{FlagRepository, NoteRepository};
use crate::repo::RepoError;
use crate::store::{DocumentStore, Resource};
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Status service failure.
#[derive(Debug)]
pub enum StatusServiceError {
    /// Resource is not one of the keyed map resources.
    NotAMapResource(Resource),
    InvalidBody(String),
    Repo(RepoError),
}

impl Display for StatusServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAMapResource(resource) => {
                write!(f, "{resource} is not a keyed status resource")
            }
            Self::InvalidBody(message) => write!(f, "invalid request body: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StatusServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StatusServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Current contents of one map resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusSnapshot {
    Flags(FlagSet),
    Notes(NoteMap),
}

/// Parsed write request for a map resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    SetFlag { problem_id: String, flagged: bool },
    SetNote { problem_id: String, note: String },
    ReplaceFlags(FlagSet),
    ReplaceNotes(NoteMap),
}

impl StatusUpdate {
    /// Classifies a request body for `resource`.
    pub fn from_request(resource: Resource, body: &Value) -> Result<Self, StatusServiceError> {
        let problem_id = body
            .get("problemId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty());

        match resource {
            Resource::Progress | Resource::Revision => {
                let field = if resource == Resource::Progress {
                    "completed"
                } else {
                    "needsRevision"
                };
                if let (Some(id), Some(flagged)) =
                    (problem_id, body.get(field).and_then(Value::as_bool))
                {
                    return Ok(Self::SetFlag {
                        problem_id: id.to_string(),
                        flagged,
                    });
                }
                Ok(Self::ReplaceFlags(FlagSet::from_json_object(
                    replace_body(body)?,
                )))
            }
            Resource::Notes => {
                if let (Some(id), Some(note)) =
                    (problem_id, body.get("note").and_then(Value::as_str))
                {
                    return Ok(Self::SetNote {
                        problem_id: id.to_string(),
                        note: note.to_string(),
                    });
                }
                Ok(Self::ReplaceNotes(NoteMap::from_json_object(replace_body(
                    body,
                )?)))
            }
            Resource::Profile => Err(StatusServiceError::NotAMapResource(resource)),
        }
    }
}

fn replace_body(body: &Value) -> Result<&serde_json::Map<String, Value>, StatusServiceError> {
    body.as_object().ok_or_else(|| {
        StatusServiceError::InvalidBody("expected a JSON object keyed by problem id".to_string())
    })
}

/// Use-case wrapper over the three map repositories.
pub struct StatusService<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> StatusService<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Completed-problem ids.
    pub fn completed(&self) -> FlagSet {
        FlagRepository::progress(self.store).read()
    }

    /// Ids flagged for revision.
    pub fn revision(&self) -> FlagSet {
        FlagRepository::revision(self.store).read()
    }

    pub fn notes(&self) -> NoteMap {
        NoteRepository::notes(self.store).read()
    }

    /// Reads any map resource; never fails for map resources.
    pub fn read(&self, resource: Resource) -> Result<StatusSnapshot, StatusServiceError> {
        match resource {
            Resource::Progress => Ok(StatusSnapshot::Flags(self.completed())),
            Resource::Revision => Ok(StatusSnapshot::Flags(self.revision())),
            Resource::Notes => Ok(StatusSnapshot::Notes(self.notes())),
            Resource::Profile => Err(StatusServiceError::NotAMapResource(resource)),
        }
    }

    /// Applies a parsed update to `resource`.
    pub fn apply(
        &self,
        resource: Resource,
        update: StatusUpdate,
    ) -> Result<StatusSnapshot, StatusServiceError> {
        let snapshot = match (resource, update) {
            (Resource::Progress | Resource::Revision, StatusUpdate::SetFlag { problem_id, flagged }) => {
                StatusSnapshot::Flags(self.flags(resource)?.set_flag(&problem_id, flagged)?)
            }
            (Resource::Progress | Resource::Revision, StatusUpdate::ReplaceFlags(flags)) => {
                self.flags(resource)?.write(&flags)?;
                StatusSnapshot::Flags(flags)
            }
            (Resource::Notes, StatusUpdate::SetNote { problem_id, note }) => {
                StatusSnapshot::Notes(NoteRepository::notes(self.store).set_note(&problem_id, &note)?)
            }
            (Resource::Notes, StatusUpdate::ReplaceNotes(notes)) => {
                NoteRepository::notes(self.store).write(&notes)?;
                StatusSnapshot::Notes(notes)
            }
            (resource, _) => {
                return Err(StatusServiceError::InvalidBody(format!(
                    "update does not match resource {resource}"
                )))
            }
        };
        info!(
            "event=status_update module=service status=ok resource={}",
            resource
        );
        Ok(snapshot)
    }

    /// Parses and applies a raw request body.
    pub fn update_from_json(
        &self,
        resource: Resource,
        body: &Value,
    ) -> Result<StatusSnapshot, StatusServiceError> {
        let update = StatusUpdate::from_request(resource, body)?;
        self.apply(resource, update)
    }

    fn flags(&self, resource: Resource) -> Result<FlagRepository<'s>, StatusServiceError> {
        match resource {
            Resource::Progress => Ok(FlagRepository::progress(self.store)),
            Resource::Revision => Ok(FlagRepository::revision(self.store)),
            other => Err(StatusServiceError::NotAMapResource(other)),
        }
    }
}
