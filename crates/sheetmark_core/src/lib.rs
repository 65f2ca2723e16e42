//! Core domain logic for Sheetmark, a local tracker for coding-practice sheets.
//! This crate is the single source of truth for business invariants.

pub mod backup;
pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod sheet;
pub mod store;

pub use backup::{
    ArchiveMetadata, BackupError, ExportedArchive, ImportReport, ImportStatus, APP_NAME,
};
pub use config::{StoragePaths, DATA_ROOT_ENV};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::profile::{ProfileGoals, ProfilePatch, UserProfile};
pub use model::sheet::{Difficulty, UnifiedSheet, UnifiedStep, UnifiedSubStep, UnifiedTopic};
pub use model::status::{FlagSet, NoteMap, ResultDocument};
pub use query::{
    aggregate, filter_topics, flatten, DifficultyFilter, ProgressStats, StatusFilter, TopicFilter,
};
pub use repo::{RepoError, RepoResult};
pub use service::backup_service::BackupService;
pub use service::profile_service::{ProfileService, ProfileServiceError};
pub use service::status_service::{
    StatusService, StatusServiceError, StatusSnapshot, StatusUpdate,
};
pub use sheet::{SheetConfig, SheetError, SheetFormat, SheetLibrary, SHEET_CONFIGS};
pub use store::{
    DocumentStore, FsDocumentStore, MemoryDocumentStore, Resource, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
