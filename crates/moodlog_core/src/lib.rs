//! Core domain logic for the mood journal.
//! This crate is the single source of truth for business invariants.

pub mod analytics;
pub mod db;
pub mod feedback;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod stats;
pub mod store;

pub use analytics::{entry_properties, AnalyticsSink, LogFileAnalytics, NullAnalytics};
pub use feedback::{submit_feedback, FeedbackTransport, QuestionFeedback};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::log_entry::{LogEntry, LogValidationError, RATING_MAX, RATING_MIN};
pub use model::settings::Settings;
pub use model::tag::{dedup_tag_ids, Tag, TagId};
pub use repo::log_repo::{
    LogRepository, NullLogRepository, RepoError, RepoResult, SqliteLogRepository,
};
pub use service::log_service::LogService;
pub use session::{CommitOutcome, EditingSession, SessionError};
pub use stats::distribution::{
    rating_distribution_for_year, short_month_label, DistributionBucket, Sufficiency,
    MONTHS_PER_YEAR,
};
pub use stats::{MIN_ITEMS, STATISTIC_MIN_LOGS};
pub use store::{LogAction, LogStore, Mutation, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
