//! Reads sheet documents from the reference-data directory.

use super::registry::{find_sheet, SheetConfig};
use super::SheetError;
use crate::model::sheet::UnifiedSheet;
use log::{error, info};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Instant;

/// Read-only view over the sheets directory.
#[derive(Debug, Clone)]
pub struct SheetLibrary {
    dir: PathBuf,
}

impl SheetLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves an optional, possibly blank sheet id against the registry.
    pub fn resolve(&self, sheet_id: Option<&str>) -> Result<&'static SheetConfig, SheetError> {
        let id = sheet_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(SheetError::MissingSheetId)?;
        find_sheet(id).ok_or_else(|| SheetError::UnknownSheet(id.to_string()))
    }

    /// Returns the sheet document exactly as stored.
    pub fn load_raw(&self, config: &'static SheetConfig) -> Result<Value, SheetError> {
        let started_at = Instant::now();
        let path = self.dir.join(config.file_name);
        let content = std::fs::read_to_string(&path).map_err(|source| {
            error!(
                "event=sheet_load module=sheet status=error sheet={} error_code=read_failed error={}",
                config.id, source
            );
            SheetError::Io {
                file_name: config.file_name,
                source,
            }
        })?;
        let value = serde_json::from_str(&content).map_err(|err| {
            error!(
                "event=sheet_load module=sheet status=error sheet={} error_code=invalid_json",
                config.id
            );
            SheetError::InvalidJson {
                file_name: config.file_name,
                message: err.to_string(),
            }
        })?;
        info!(
            "event=sheet_load module=sheet status=ok sheet={} bytes={} duration_ms={}",
            config.id,
            content.len(),
            started_at.elapsed().as_millis()
        );
        Ok(value)
    }

    /// Loads and normalizes a sheet into the unified shape.
    pub fn load_unified(&self, config: &'static SheetConfig) -> Result<UnifiedSheet, SheetError> {
        let raw = self.load_raw(config)?;
        config
            .format
            .normalize(raw)
            .map_err(|err| SheetError::Format {
                sheet_id: config.id,
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::SheetLibrary;
    use crate::sheet::SheetError;

    #[test]
    fn resolve_rejects_missing_and_unknown_ids() {
        let library = SheetLibrary::new("/nonexistent");
        assert!(matches!(
            library.resolve(None),
            Err(SheetError::MissingSheetId)
        ));
        assert!(matches!(
            library.resolve(Some("  ")),
            Err(SheetError::MissingSheetId)
        ));
        assert!(matches!(
            library.resolve(Some("leetcode150")),
            Err(SheetError::UnknownSheet(_))
        ));
        assert_eq!(library.resolve(Some("sde")).unwrap().name, "SDE Sheet");
    }

    #[test]
    fn missing_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let library = SheetLibrary::new(dir.path());
        let config = library.resolve(Some("blind75")).unwrap();

        let err = library.load_raw(config).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
        assert!(!err.is_unknown_identifier());
    }

    #[test]
    fn load_unified_uses_declared_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("striver_79_data.json"),
            r#"{"sheetData":[{"step_no":1,"head_step_no":"Day 1","topics":[{"id":"x","title":"Set zeroes","sl_no_in_step":1}]}]}"#,
        )
        .unwrap();
        let library = SheetLibrary::new(dir.path());
        let config = library.resolve(Some("striver79")).unwrap();

        let sheet = library.load_unified(config).unwrap();
        assert_eq!(sheet[0].sub_steps[0].topics[0].question_title, "Set zeroes");
    }
}
