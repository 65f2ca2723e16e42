//! Profile repository.

use super::{encode_document, RepoError, RepoResult};
use crate::model::profile::UserProfile;
use crate::model::timestamp_now;
use crate::store::{DocumentStore, Resource};
use log::{error, info};

/// Reads and writes the singleton profile document.
pub struct ProfileRepository<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> ProfileRepository<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Returns the stored profile, creating the default one on first access.
    ///
    /// # Errors
    /// - `Store` when the document cannot be created or read.
    /// - `InvalidData` when the stored document is not a profile.
    pub fn get_or_create(&self) -> RepoResult<UserProfile> {
        let default_doc =
            encode_document(Resource::Profile, &UserProfile::new_default(timestamp_now()))?;
        match self.store.create_if_absent(Resource::Profile, &default_doc) {
            Ok(true) => info!("event=profile_create module=repo status=ok"),
            Ok(false) => {}
            Err(err) => {
                error!(
                    "event=profile_create module=repo status=error error={}",
                    err
                );
                return Err(err.into());
            }
        }

        let raw = self.store.load(Resource::Profile)?.ok_or_else(|| {
            RepoError::InvalidData {
                resource: Resource::Profile,
                message: "document vanished after creation".to_string(),
            }
        })?;
        decode_profile(&raw)
    }

    /// Replaces the stored profile.
    pub fn save(&self, profile: &UserProfile) -> RepoResult<()> {
        let content = encode_document(Resource::Profile, profile)?;
        self.store.save(Resource::Profile, &content)?;
        Ok(())
    }
}

/// Decodes a raw profile document.
pub fn decode_profile(raw: &str) -> RepoResult<UserProfile> {
    serde_json::from_str(raw).map_err(|err| {
        error!(
            "event=profile_decode module=repo status=error line={} column={}",
            err.line(),
            err.column()
        );
        RepoError::InvalidData {
            resource: Resource::Profile,
            message: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::ProfileRepository;
    use crate::repo::RepoError;
    use crate::store::{MemoryDocumentStore, Resource};

    #[test]
    fn first_read_creates_default_once() {
        let store = MemoryDocumentStore::new();
        let repo = ProfileRepository::new(&store);

        let first = repo.get_or_create().unwrap();
        let second = repo.get_or_create().unwrap();

        assert!(!first.is_onboarded);
        assert_eq!(first, second);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn corrupt_profile_fails_without_overwrite() {
        let store = MemoryDocumentStore::new().with_document(Resource::Profile, "{not json");
        let repo = ProfileRepository::new(&store);

        let err = repo.get_or_create().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData { .. }));
        assert_eq!(store.snapshot(Resource::Profile).as_deref(), Some("{not json"));
    }
}
