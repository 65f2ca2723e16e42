//! Profile use-case service.
//!
//! # Invariants
//! - Every successful update marks the profile as onboarded.
//! - `createdAt` is server-owned and only backfilled when empty.

use crate::model::profile::{ProfilePatch, UserProfile};
use crate::model::timestamp_now;
use crate::repo::profile_repo::ProfileRepository;
use crate::repo::RepoError;
use crate::store::DocumentStore;
use log::info;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Profile service failure.
#[derive(Debug)]
pub enum ProfileServiceError {
    /// Request body is not a profile patch object.
    InvalidPatch(String),
    Repo(RepoError),
}

impl Display for ProfileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPatch(message) => write!(f, "invalid profile update: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProfileServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPatch(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ProfileServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case wrapper over the profile repository.
pub struct ProfileService<'s> {
    repo: ProfileRepository<'s>,
}

impl<'s> ProfileService<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self {
            repo: ProfileRepository::new(store),
        }
    }

    /// Returns the profile, creating the default one on first access.
    pub fn get(&self) -> Result<UserProfile, ProfileServiceError> {
        Ok(self.repo.get_or_create()?)
    }

    /// Merges `patch` into the stored profile and persists the result.
    pub fn update(&self, patch: ProfilePatch) -> Result<UserProfile, ProfileServiceError> {
        let mut profile = self.repo.get_or_create()?;
        profile.apply_patch(patch, timestamp_now);
        self.repo.save(&profile)?;
        info!("event=profile_update module=service status=ok");
        Ok(profile)
    }

    /// Same as [`Self::update`] for an untyped request body.
    pub fn update_from_json(&self, body: Value) -> Result<UserProfile, ProfileServiceError> {
        if !body.is_object() {
            return Err(ProfileServiceError::InvalidPatch(
                "expected a JSON object".to_string(),
            ));
        }
        let patch: ProfilePatch = serde_json::from_value(body)
            .map_err(|err| ProfileServiceError::InvalidPatch(err.to_string()))?;
        self.update(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfileService, ProfileServiceError};
    use crate::store::{MemoryDocumentStore, Resource};
    use serde_json::json;

    #[test]
    fn update_onboards_and_keeps_creation_time() {
        let store = MemoryDocumentStore::new();
        let service = ProfileService::new(&store);
        let created = service.get().unwrap();

        let updated = service
            .update_from_json(json!({"name": "Ada", "goals": {"dailyProblems": 5}}))
            .unwrap();

        assert!(updated.is_onboarded);
        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.goals.daily_problems, 5);
        assert_eq!(updated.goals.weekly_goal, 20);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(service.get().unwrap(), updated);
    }

    #[test]
    fn non_object_body_is_rejected_without_writes() {
        let store = MemoryDocumentStore::new();
        let service = ProfileService::new(&store);

        let err = service.update_from_json(json!([1, 2])).unwrap_err();

        assert!(matches!(err, ProfileServiceError::InvalidPatch(_)));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn cleared_goal_inputs_merge_as_defaults() {
        let store = MemoryDocumentStore::new();
        let updated = ProfileService::new(&store)
            .update_from_json(json!({
                "name": "Ada",
                "goals": {"dailyProblems": null, "weeklyGoal": null, "focusAreas": ["dp"]}
            }))
            .unwrap();
        assert_eq!(updated.goals.daily_problems, 3);
        assert_eq!(updated.goals.weekly_goal, 20);
        assert_eq!(updated.goals.focus_areas, vec!["dp".to_string()]);
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let store = MemoryDocumentStore::new();
        let err = ProfileService::new(&store)
            .update_from_json(json!({"name": 7}))
            .unwrap_err();
        assert!(matches!(err, ProfileServiceError::InvalidPatch(_)));
    }

    #[test]
    fn corrupt_profile_blocks_update() {
        let store = MemoryDocumentStore::new().with_document(Resource::Profile, "nope");
        let err = ProfileService::new(&store)
            .update_from_json(json!({"name": "Ada"}))
            .unwrap_err();
        assert!(matches!(err, ProfileServiceError::Repo(_)));
        assert_eq!(store.snapshot(Resource::Profile).as_deref(), Some("nope"));
    }
}
