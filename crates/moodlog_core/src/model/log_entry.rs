//! Log entry domain model.
//!
//! # Responsibility
//! - Define the canonical record for one calendar day's mood log.
//! - Provide validation for the committed-entry contract.
//!
//! # Invariants
//! - `date` is the unique key of an entry; one entry per day.
//! - `rating` may be unset only while a draft is being edited; every
//!   entry inside the store carries a rating in `RATING_MIN..=RATING_MAX`.

use crate::model::tag::Tag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest value of the ordinal rating scale.
pub const RATING_MIN: u8 = 1;
/// Highest value of the ordinal rating scale.
pub const RATING_MAX: u8 = 5;

/// Validation error for log entry contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogValidationError {
    /// Rating is outside the fixed ordinal scale.
    RatingOutOfScale { rating: u8 },
}

impl Display for LogValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RatingOutOfScale { rating } => write!(
                f,
                "rating {rating} is outside the scale {RATING_MIN}..={RATING_MAX}"
            ),
        }
    }
}

impl Error for LogValidationError {}

/// One calendar day's mood record.
///
/// `rating` is optional so the same shape can serve as the editing draft;
/// the store only ever holds entries where `rating` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Day-precision date key. Serializes as canonical `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Mood rating on the fixed ordinal scale. `None` only while drafting.
    pub rating: Option<u8>,
    /// Free-text note. May be empty.
    pub message: String,
    /// Ordered tag references. Duplicates by id are tolerated.
    pub tags: Vec<Tag>,
}

impl LogEntry {
    /// Creates an empty draft for the given date.
    pub fn draft(date: NaiveDate) -> Self {
        Self {
            date,
            rating: None,
            message: String::new(),
            tags: Vec::new(),
        }
    }

    /// Creates a committed entry with a rating already set.
    pub fn new(date: NaiveDate, rating: u8, message: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            date,
            rating: Some(rating),
            message: message.into(),
            tags,
        }
    }

    /// Canonical `YYYY-MM-DD` key used by persistence and analytics.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Returns whether the entry still lacks a rating.
    pub fn is_draft(&self) -> bool {
        self.rating.is_none()
    }

    /// Checks the committed-entry contract for the rating scale.
    ///
    /// An unset rating passes here; draft rejection is the store's job.
    pub fn validate(&self) -> Result<(), LogValidationError> {
        if let Some(rating) = self.rating {
            if !(RATING_MIN..=RATING_MAX).contains(&rating) {
                return Err(LogValidationError::RatingOutOfScale { rating });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LogEntry, LogValidationError};
    use chrono::NaiveDate;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn draft_starts_without_rating() {
        let entry = LogEntry::draft(day("2024-03-01"));
        assert!(entry.is_draft());
        assert_eq!(entry.message, "");
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn date_key_is_canonical() {
        let entry = LogEntry::new(day("2024-03-01"), 4, "ok", Vec::new());
        assert_eq!(entry.date_key(), "2024-03-01");
    }

    #[test]
    fn validate_rejects_out_of_scale_rating() {
        let entry = LogEntry::new(day("2024-03-01"), 6, "", Vec::new());
        assert_eq!(
            entry.validate().unwrap_err(),
            LogValidationError::RatingOutOfScale { rating: 6 }
        );
    }

    #[test]
    fn serialization_uses_canonical_date_string() {
        let entry = LogEntry::new(day("2024-03-01"), 4, "ok", Vec::new());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["rating"], 4);

        let decoded: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, entry);
    }
}
