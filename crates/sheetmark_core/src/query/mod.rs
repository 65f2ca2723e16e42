//! Pure queries over a loaded sheet and status sets.
//!
//! # Invariants
//! - No I/O; callers pass everything in.
//! - Ids present in status sets but absent from the sheet are ignored.

pub mod filter;
pub mod stats;

pub use filter::{filter_topics, flatten, DifficultyFilter, StatusFilter, TopicFilter};
pub use stats::{aggregate, DifficultyStats, ProgressStats, Tally};
