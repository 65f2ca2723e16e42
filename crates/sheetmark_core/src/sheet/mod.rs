//! Sheet reference data: registry, source formats and loading.
//!
//! # Responsibility
//! - Map sheet ids to display names, files and source formats.
//! - Normalize each source format into the unified sheet shape.
//! - Read sheet documents from the reference directory.
//!
//! # Invariants
//! - Sheet data is never written by this crate.
//! - Normalizing the same document twice yields identical output.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod a2z;
pub mod format;
pub mod general;
pub mod loader;
pub mod registry;

pub use format::SheetFormat;
pub use loader::SheetLibrary;
pub use registry::{find_sheet, SheetConfig, SHEET_CONFIGS};

/// Sheet lookup and decoding failure.
#[derive(Debug)]
pub enum SheetError {
    MissingSheetId,
    UnknownSheet(String),
    Io {
        file_name: &'static str,
        source: std::io::Error,
    },
    InvalidJson {
        file_name: &'static str,
        message: String,
    },
    /// Document is JSON but does not match the sheet's declared format.
    Format {
        sheet_id: &'static str,
        message: String,
    },
}

impl SheetError {
    /// Whether the caller asked for a sheet that does not exist.
    pub fn is_unknown_identifier(&self) -> bool {
        matches!(self, Self::MissingSheetId | Self::UnknownSheet(_))
    }
}

impl Display for SheetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSheetId => write!(f, "Sheet ID is required"),
            Self::UnknownSheet(id) => write!(f, "Invalid sheet ID: {id}"),
            Self::Io { file_name, source } => {
                write!(f, "Failed to load sheet data: {file_name}: {source}")
            }
            Self::InvalidJson { file_name, message } => {
                write!(f, "Failed to load sheet data: {file_name}: {message}")
            }
            Self::Format { sheet_id, message } => {
                write!(f, "sheet `{sheet_id}` does not match its format: {message}")
            }
        }
    }
}

impl Error for SheetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Accepts ids written either as strings or as numbers.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
