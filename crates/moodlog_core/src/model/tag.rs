//! Tag reference attached to log entries.
//!
//! # Invariants
//! - Identity is `id` only; `title` and `emoji` are locale-dependent
//!   display data and never participate in equality-by-identity logic.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a tag.
pub type TagId = Uuid;

/// User-defined label attached to a log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable id used for linking and analytics payloads.
    pub id: TagId,
    /// Display title. Not part of identity.
    pub title: String,
    /// Optional emoji shown next to the title.
    pub emoji: Option<String>,
}

impl Tag {
    /// Creates a tag with a generated stable id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a tag with a caller-provided id.
    ///
    /// Used by import/persistence paths where identity already exists.
    pub fn with_id(id: TagId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            emoji: None,
        }
    }
}

/// Returns tag ids with duplicates-by-identity removed, first occurrence wins.
///
/// Entries may carry the same tag more than once; statistics and analytics
/// count each tag id at most once per entry.
pub fn dedup_tag_ids(tags: &[Tag]) -> Vec<TagId> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if !seen.contains(&tag.id) {
            seen.push(tag.id);
        }
    }
    seen
}
