//! Static catalog of supported sheets.

use super::format::SheetFormat;
use serde::Serialize;

/// One supported curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetConfig {
    pub id: &'static str,
    pub name: &'static str,
    /// File name under the sheets directory.
    pub file_name: &'static str,
    pub description: &'static str,
    pub format: SheetFormat,
}

pub const SHEET_CONFIGS: &[SheetConfig] = &[
    SheetConfig {
        id: "a2z",
        name: "A2Z DSA Course",
        file_name: "a2z_sheet_data.json",
        description: "Complete A to Z DSA course by Striver with 400+ problems",
        format: SheetFormat::A2z,
    },
    SheetConfig {
        id: "sde",
        name: "SDE Sheet",
        file_name: "sde_sheet_data.json",
        description: "Top coding interview problems for SDE roles",
        format: SheetFormat::General,
    },
    SheetConfig {
        id: "blind75",
        name: "Blind 75",
        file_name: "blind_75_data.json",
        description: "Must-solve 75 problems for coding interviews",
        format: SheetFormat::General,
    },
    SheetConfig {
        id: "striver79",
        name: "Striver 79",
        file_name: "striver_79_data.json",
        description: "Curated 79 problems by Striver for interview prep",
        format: SheetFormat::General,
    },
];

/// Looks up a sheet by exact id.
pub fn find_sheet(id: &str) -> Option<&'static SheetConfig> {
    SHEET_CONFIGS.iter().find(|config| config.id == id)
}

#[cfg(test)]
mod tests {
    use super::{find_sheet, SHEET_CONFIGS};
    use crate::sheet::SheetFormat;
    use std::collections::BTreeSet;

    #[test]
    fn ids_and_files_are_unique() {
        let ids: BTreeSet<_> = SHEET_CONFIGS.iter().map(|c| c.id).collect();
        let files: BTreeSet<_> = SHEET_CONFIGS.iter().map(|c| c.file_name).collect();
        assert_eq!(ids.len(), SHEET_CONFIGS.len());
        assert_eq!(files.len(), SHEET_CONFIGS.len());
    }

    #[test]
    fn only_a2z_uses_nested_format() {
        assert_eq!(find_sheet("a2z").unwrap().format, SheetFormat::A2z);
        assert_eq!(find_sheet("blind75").unwrap().format, SheetFormat::General);
        assert!(find_sheet("A2Z").is_none());
    }
}
