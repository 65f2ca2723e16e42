//! Backup archive format.
//!
//! # Responsibility
//! - Define archive metadata and the per-resource import report.
//! - Pack and unpack zip archives of named JSON entries.
//!
//! # Invariants
//! - Every archive carries `metadata.json` naming this application.
//! - Resource entries are stored verbatim, so export then import restores
//!   identical bytes.
//!
//! Orchestration over the store lives in `service::backup_service`.

use crate::store::{Resource, StoreError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod archive;

/// Application identifier checked on import.
pub const APP_NAME: &str = "DSA Practice Tracker";
/// Archive layout version written into metadata.
pub const BACKUP_FORMAT_VERSION: &str = "1.0.0";
pub const BACKUP_DESCRIPTION: &str =
    "User data backup containing progress, notes, profile, and revision data";
pub const METADATA_ENTRY: &str = "metadata.json";

const FILE_NAME_PREFIX: &str = "dsa-tracker-backup-";

/// Download name for an archive exported on `date` (`YYYY-MM-DD`).
pub fn archive_file_name(date: &str) -> String {
    format!("{FILE_NAME_PREFIX}{date}.zip")
}

/// Contents of `metadata.json`.
///
/// Missing fields decode as empty strings so a foreign archive is reported
/// as foreign rather than malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveMetadata {
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub description: String,
}

impl ArchiveMetadata {
    pub fn new(export_date: impl Into<String>) -> Self {
        Self {
            export_date: export_date.into(),
            version: BACKUP_FORMAT_VERSION.to_string(),
            app_name: APP_NAME.to_string(),
            description: BACKUP_DESCRIPTION.to_string(),
        }
    }
}

/// Outcome of importing one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Imported,
    /// Entry exists but is not valid JSON; the stored document was kept.
    FailedInvalidJson,
    /// Archive has no entry for the resource; the stored document was kept.
    NotFoundInBackup,
}

impl ImportStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Imported => "imported",
            Self::FailedInvalidJson => "failed - invalid JSON",
            Self::NotFoundInBackup => "not_found_in_backup",
        }
    }
}

impl Serialize for ImportStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A packed export ready for download.
#[derive(Debug, Clone)]
pub struct ExportedArchive {
    pub file_name: String,
    pub metadata: ArchiveMetadata,
    pub bytes: Vec<u8>,
}

/// Result of a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// `exportDate` recorded in the archive metadata.
    pub backup_date: String,
    /// Completion time of this import.
    pub import_date: String,
    /// Status per resource, in archive order.
    pub results: Vec<(Resource, ImportStatus)>,
}

impl ImportReport {
    pub fn status_of(&self, resource: Resource) -> Option<ImportStatus> {
        self.results
            .iter()
            .find(|(candidate, _)| *candidate == resource)
            .map(|(_, status)| *status)
    }
}

/// Export/import failure.
#[derive(Debug)]
pub enum BackupError {
    /// Upload is not a readable zip archive.
    InvalidArchive(String),
    MissingMetadata,
    InvalidMetadata(String),
    /// Metadata names another application.
    ForeignArchive { app_name: String },
    /// Archive could not be written.
    Pack(String),
    Store(StoreError),
}

impl BackupError {
    /// Whether the failure is caused by the uploaded content rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArchive(_)
                | Self::MissingMetadata
                | Self::InvalidMetadata(_)
                | Self::ForeignArchive { .. }
        )
    }
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArchive(message) => {
                write!(f, "Invalid backup file. Not a readable ZIP archive: {message}")
            }
            Self::MissingMetadata => write!(
                f,
                "Invalid backup file. Missing metadata. Please ensure you are uploading a valid DSA Tracker backup."
            ),
            Self::InvalidMetadata(message) => {
                write!(f, "Invalid backup file. Metadata is not valid JSON: {message}")
            }
            Self::ForeignArchive { .. } => write!(
                f,
                "Invalid backup file. This backup was not created by {APP_NAME}."
            ),
            Self::Pack(message) => write!(f, "failed to build backup archive: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for BackupError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
