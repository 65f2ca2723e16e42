//! Source format dispatch.

use super::{a2z, general};
use crate::model::sheet::UnifiedSheet;
use serde::Serialize;
use serde_json::Value;

/// On-disk layout of a sheet document.
///
/// New layouts are added as a variant plus a module implementing `normalize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    /// Top-level array of steps, each with nested sub-steps.
    A2z,
    /// `{ "sheetData": [...] }` of flat steps; sub-steps are synthesized.
    General,
}

impl SheetFormat {
    /// Converts a raw sheet document into the unified shape.
    pub fn normalize(self, raw: Value) -> Result<UnifiedSheet, serde_json::Error> {
        match self {
            Self::A2z => a2z::normalize(raw),
            Self::General => general::normalize(raw),
        }
    }
}
