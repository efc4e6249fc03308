//! Fire-and-forget behavioral analytics boundary.
//!
//! # Responsibility
//! - Define the outbound tracking contract used around commit/delete/cancel.
//! - Provide sinks for disabled tracking and local diagnostics.
//!
//! # Invariants
//! - Tracking is never required to succeed and is never read back.
//! - Payloads carry tag ids only, never tag titles.

use crate::model::log_entry::LogEntry;
use crate::model::tag::dedup_tag_ids;
use log::info;
use serde_json::{json, Value};

/// Outbound event sink. Implementations must not block core flows.
pub trait AnalyticsSink {
    fn track(&self, event: &str, properties: Value);
}

/// Sink used when behavioral tracking is disabled.
pub struct NullAnalytics;

impl AnalyticsSink for NullAnalytics {
    fn track(&self, _event: &str, _properties: Value) {}
}

/// Sink that mirrors events into the rolling log file.
pub struct LogFileAnalytics;

impl AnalyticsSink for LogFileAnalytics {
    fn track(&self, event: &str, properties: Value) {
        info!("event={event} module=analytics status=ok properties={properties}");
    }
}

/// Builds the standard entry metadata payload.
///
/// Message content is reduced to its length; tags are reduced to
/// deduplicated ids.
pub fn entry_properties(entry: &LogEntry) -> Value {
    json!({
        "date": entry.date_key(),
        "messageLength": entry.message.chars().count(),
        "rating": entry.rating,
        "tags": dedup_tag_ids(&entry.tags)
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::entry_properties;
    use crate::model::log_entry::LogEntry;
    use crate::model::tag::Tag;
    use chrono::NaiveDate;

    #[test]
    fn entry_properties_strip_tag_titles() {
        let tag = Tag::new("private title");
        let entry = LogEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            4,
            "hello",
            vec![tag.clone(), tag.clone()],
        );

        let props = entry_properties(&entry);
        assert_eq!(props["date"], "2024-03-01");
        assert_eq!(props["messageLength"], 5);
        assert_eq!(props["rating"], 4);
        assert_eq!(props["tags"].as_array().unwrap().len(), 1);
        assert_eq!(props["tags"][0], tag.id.to_string());
        assert!(!props.to_string().contains("private title"));
    }
}
