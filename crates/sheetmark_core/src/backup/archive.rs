//! Zip packing of named text entries.

use super::BackupError;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Packs `(name, content)` entries into an in-memory deflated zip.
pub fn pack_entries<'a, I>(entries: I) -> Result<Vec<u8>, BackupError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in entries {
        writer
            .start_file(name, options)
            .map_err(|err| BackupError::Pack(format!("{name}: {err}")))?;
        writer
            .write_all(content.as_bytes())
            .map_err(|err| BackupError::Pack(format!("{name}: {err}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|err| BackupError::Pack(err.to_string()))?;
    Ok(cursor.into_inner())
}

/// Reads every file entry of a zip archive into memory.
///
/// Leading slashes are stripped from entry names; directories are skipped.
pub fn unpack_entries(data: &[u8]) -> Result<BTreeMap<String, Vec<u8>>, BackupError> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|err| BackupError::InvalidArchive(err.to_string()))?;
    let mut entries = BTreeMap::new();

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|err| BackupError::InvalidArchive(err.to_string()))?;
        if !file.is_file() {
            continue;
        }
        let name = file.name().trim_start_matches('/').to_string();
        if name.is_empty() {
            continue;
        }
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|err| BackupError::InvalidArchive(format!("{name}: {err}")))?;
        entries.insert(name, contents);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::{pack_entries, unpack_entries};
    use crate::backup::BackupError;

    #[test]
    fn packed_entries_unpack_unchanged() {
        let bytes = pack_entries([("a.json", "{\"x\": 1}"), ("b.json", "")]).unwrap();
        let entries = unpack_entries(&bytes).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries["a.json"], b"{\"x\": 1}".to_vec());
        assert!(entries["b.json"].is_empty());
    }

    #[test]
    fn garbage_is_not_an_archive() {
        let err = unpack_entries(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, BackupError::InvalidArchive(_)));
    }
}
