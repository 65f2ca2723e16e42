//! Domain model for tracker documents and unified sheets.
//!
//! # Responsibility
//! - Define the canonical shapes business logic works with.
//! - Keep storage encodings (presence/absence maps, `result` envelopes)
//!   at the serde boundary.
//!
//! # Invariants
//! - Problem ids are opaque strings; nothing checks them against a sheet.

pub mod profile;
pub mod sheet;
pub mod status;

use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC 3339 with millisecond precision (`2024-05-01T10:00:00.000Z`).
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
