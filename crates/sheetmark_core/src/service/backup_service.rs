//! Backup export/import over the document store.
//!
//! # Responsibility
//! - Pack the four resource documents plus metadata into one archive.
//! - Validate an uploaded archive, then restore each resource independently.
//!
//! # Invariants
//! - Archive-level validation completes before any document is written.
//! - Imported documents are written byte for byte as found in the archive.
//! - Import is not atomic across resources; a later storage failure leaves
//!   earlier resources restored.

use crate::backup::archive::{pack_entries, unpack_entries};
use crate::backup::{
    archive_file_name, ArchiveMetadata, BackupError, ExportedArchive, ImportReport, ImportStatus,
    APP_NAME, METADATA_ENTRY,
};
use crate::model::profile::UserProfile;
use crate::model::status::{FlagSet, ResultDocument};
use crate::store::{DocumentStore, Resource};
use chrono::{DateTime, SecondsFormat, Utc};
use log::{error, info, warn};
use std::time::Instant;

/// Use-case service for backup archives.
pub struct BackupService<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> BackupService<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Builds an archive of every resource as of `now`.
    ///
    /// Missing or unreadable documents are exported as their defaults.
    pub fn export(&self, now: DateTime<Utc>) -> Result<ExportedArchive, BackupError> {
        let started_at = Instant::now();
        let export_date = rfc3339_millis(now);

        let mut documents = Vec::with_capacity(Resource::ALL.len() + 1);
        for resource in Resource::ALL {
            let content = match self.store.load(resource) {
                Ok(Some(raw)) => raw,
                Ok(None) => default_document(resource, &export_date)?,
                Err(err) => {
                    warn!(
                        "event=backup_export module=backup status=degraded resource={} error={}",
                        resource, err
                    );
                    default_document(resource, &export_date)?
                }
            };
            documents.push((resource.file_name(), content));
        }

        let metadata = ArchiveMetadata::new(export_date);
        let metadata_json = serde_json::to_string_pretty(&metadata)
            .map_err(|err| BackupError::Pack(err.to_string()))?;
        documents.push((METADATA_ENTRY, metadata_json));

        let bytes = pack_entries(
            documents
                .iter()
                .map(|(name, content)| (*name, content.as_str())),
        )?;

        info!(
            "event=backup_export module=backup status=ok bytes={} duration_ms={}",
            bytes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(ExportedArchive {
            file_name: archive_file_name(&now.format("%Y-%m-%d").to_string()),
            metadata,
            bytes,
        })
    }

    /// Restores resources from an uploaded archive.
    ///
    /// # Errors
    /// - Validation errors when the archive is unreadable, lacks metadata or
    ///   was produced by another application. Nothing is written.
    /// - `Store` when writing a resource fails.
    pub fn import(&self, data: &[u8], now: DateTime<Utc>) -> Result<ImportReport, BackupError> {
        let started_at = Instant::now();
        let entries = unpack_entries(data).map_err(|err| {
            warn!("event=backup_import module=backup status=rejected error_code=invalid_archive");
            err
        })?;

        let metadata = read_metadata(entries.get(METADATA_ENTRY).map(Vec::as_slice))?;
        if metadata.app_name != APP_NAME {
            warn!(
                "event=backup_import module=backup status=rejected error_code=foreign_archive app_name_len={}",
                metadata.app_name.len()
            );
            return Err(BackupError::ForeignArchive {
                app_name: metadata.app_name,
            });
        }

        let mut results = Vec::with_capacity(Resource::ALL.len());
        for resource in Resource::ALL {
            let status = match entries.get(resource.file_name()) {
                None => ImportStatus::NotFoundInBackup,
                Some(bytes) => match valid_json_text(bytes) {
                    Some(text) => {
                        self.store.save(resource, text).map_err(|err| {
                            error!(
                                "event=backup_import module=backup status=error resource={} error={}",
                                resource, err
                            );
                            err
                        })?;
                        ImportStatus::Imported
                    }
                    None => ImportStatus::FailedInvalidJson,
                },
            };
            info!(
                "event=backup_import_resource module=backup status={} resource={}",
                status.label(),
                resource
            );
            results.push((resource, status));
        }

        info!(
            "event=backup_import module=backup status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(ImportReport {
            backup_date: metadata.export_date,
            import_date: rfc3339_millis(now),
            results,
        })
    }
}

fn read_metadata(entry: Option<&[u8]>) -> Result<ArchiveMetadata, BackupError> {
    let bytes = entry.ok_or_else(|| {
        warn!("event=backup_import module=backup status=rejected error_code=missing_metadata");
        BackupError::MissingMetadata
    })?;
    serde_json::from_slice(bytes).map_err(|err| {
        warn!("event=backup_import module=backup status=rejected error_code=invalid_metadata");
        BackupError::InvalidMetadata(err.to_string())
    })
}

/// Returns the entry as text when it is UTF-8 holding one JSON value.
fn valid_json_text(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    serde_json::from_str::<serde_json::Value>(text).ok()?;
    Some(text)
}

fn default_document(resource: Resource, created_at: &str) -> Result<String, BackupError> {
    let encoded = match resource {
        Resource::Profile => serde_json::to_string_pretty(&UserProfile::new_default(created_at)),
        _ => serde_json::to_string_pretty(&ResultDocument::new(FlagSet::new())),
    };
    encoded.map_err(|err| BackupError::Pack(err.to_string()))
}

fn rfc3339_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
