//! Data directory layout.
//!
//! # Responsibility
//! - Resolve where user documents, sheet reference data and logs live.
//!
//! # Invariants
//! - User documents and sheet data never share a directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data root.
pub const DATA_ROOT_ENV: &str = "SHEETMARK_DATA_ROOT";

const DEFAULT_DATA_ROOT: &str = "data";
const USER_DIR_NAME: &str = "user";
const SHEETS_DIR_NAME: &str = "sheets";
const LOGS_DIR_NAME: &str = "logs";

/// Resolved on-disk layout for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    /// Directory holding `profile.json`, `progress.json`, `notes.json`, `revision.json`.
    pub user_dir: PathBuf,
    /// Read-only sheet reference documents.
    pub sheets_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl StoragePaths {
    /// Derives the standard layout under `root`.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            user_dir: root.join(USER_DIR_NAME),
            sheets_dir: root.join(SHEETS_DIR_NAME),
            log_dir: root.join(LOGS_DIR_NAME),
        }
    }
}

/// Picks the data root from an optional raw override, normally the value of
/// [`DATA_ROOT_ENV`] or a `--data-root` flag.
pub fn resolve_data_root(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_DATA_ROOT),
    }
}
