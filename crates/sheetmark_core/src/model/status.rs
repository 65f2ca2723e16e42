//! Per-problem status documents: completion flags, revision flags and notes.
//!
//! # Responsibility
//! - Hold flag state as a set of ids and notes as an ordered map.
//! - Translate to and from the stored `{ "result": { id: value } }` encoding.
//!
//! # Invariants
//! - A flag is set iff its id is present; stored value is always `1`.
//! - Notes are trimmed and never empty; blank input removes the entry.
//!
//! Stored documents follow JavaScript truthiness: when decoding flags any
//! truthy value marks the id, falsy values (`0`, `false`, `""`, `null`) are
//! dropped. Non-string or blank note values are dropped.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Stored wrapper shared by all map resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDocument<T> {
    pub result: T,
}

impl<T> ResultDocument<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// Set of problem ids carrying one boolean flag (completed or needs revision).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    ids: BTreeSet<String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Sets or clears the flag for `id`; returns whether the set changed.
    pub fn set(&mut self, id: &str, flagged: bool) -> bool {
        if flagged {
            self.ids.insert(id.to_string())
        } else {
            self.ids.remove(id)
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Builds a set from a client JSON object using truthiness per entry.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let ids = object
            .iter()
            .filter(|(_, value)| is_truthy(value))
            .map(|(id, _)| id.clone())
            .collect();
        Self { ids }
    }
}

impl<S: AsRef<str>> FromIterator<S> for FlagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(|id| id.as_ref().to_string()).collect(),
        }
    }
}

impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ids.len()))?;
        for id in &self.ids {
            map.serialize_entry(id, &1)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FlagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_json_object(&raw))
    }
}

/// Free-text notes keyed by problem id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMap {
    notes: BTreeMap<String, String>,
}

impl NoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.notes.get(id).map(String::as_str)
    }

    /// Stores the trimmed note, or removes the entry when it trims to empty.
    pub fn set(&mut self, id: &str, note: &str) {
        let trimmed = note.trim();
        if trimmed.is_empty() {
            self.notes.remove(id);
        } else {
            self.notes.insert(id.to_string(), trimmed.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.notes
            .iter()
            .map(|(id, note)| (id.as_str(), note.as_str()))
    }

    /// Builds notes from a client JSON object; non-string and blank values are dropped.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut notes = Self::new();
        for (id, value) in object {
            if let Value::String(note) = value {
                notes.set(id, note);
            }
        }
        notes
    }
}

impl Serialize for NoteMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.notes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NoteMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_json_object(&raw))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::{FlagSet, NoteMap, ResultDocument};
    use serde_json::json;

    #[test]
    fn flags_serialize_as_presence_map() {
        let flags: FlagSet = ["b", "a"].into_iter().collect();
        let encoded = serde_json::to_value(ResultDocument::new(flags)).unwrap();
        assert_eq!(encoded, json!({"result": {"a": 1, "b": 1}}));
    }

    #[test]
    fn flags_decode_with_truthiness() {
        let decoded: ResultDocument<FlagSet> = serde_json::from_value(json!({
            "result": {"one": 1, "zero": 0, "yes": true, "no": false, "null": null, "s": "x"}
        }))
        .unwrap();
        let ids: Vec<&str> = decoded.result.iter().collect();
        assert_eq!(ids, vec!["one", "s", "yes"]);
    }

    #[test]
    fn set_reports_changes() {
        let mut flags = FlagSet::new();
        assert!(flags.set("p1", true));
        assert!(!flags.set("p1", true));
        assert!(flags.set("p1", false));
        assert!(flags.is_empty());
    }

    #[test]
    fn blank_note_removes_entry_and_text_is_trimmed() {
        let mut notes = NoteMap::new();
        notes.set("p1", "  two pointers  ");
        assert_eq!(notes.get("p1"), Some("two pointers"));
        notes.set("p1", "   ");
        assert_eq!(notes.get("p1"), None);
    }

    #[test]
    fn notes_decode_drops_non_string_values() {
        let decoded: NoteMap =
            serde_json::from_value(json!({"a": "keep", "b": 3, "c": ""})).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get("a"), Some("keep"));
    }
}
