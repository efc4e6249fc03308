//! Domain model for the mood journal.
//!
//! # Responsibility
//! - Define the canonical per-day log record and its tag references.
//! - Keep validation rules for committed entries in one place.
//!
//! # Invariants
//! - A log entry is keyed by its calendar date (day precision).
//! - A committed entry always carries a rating on the fixed ordinal scale.

pub mod log_entry;
pub mod settings;
pub mod tag;
