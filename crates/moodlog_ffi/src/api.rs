//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the app shell via FRB.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Date parameters are canonical `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use moodlog_core::db::open_db;
use moodlog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    rating_distribution_for_year, short_month_label, EditingSession, LogFileAnalytics, LogService,
    Settings, SqliteLogRepository, Sufficiency, Tag, MIN_ITEMS,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const JOURNAL_DB_FILE_NAME: &str = "moodlog_journal.sqlite3";
static JOURNAL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Tag payload crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTagItem {
    /// Stable tag id in string form.
    pub id: String,
    pub title: String,
    pub emoji: Option<String>,
}

/// One stored log entry as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct LogItem {
    /// Canonical `YYYY-MM-DD` date key.
    pub date: String,
    pub rating: u8,
    pub message: String,
    pub tags: Vec<LogTagItem>,
}

/// Result envelope for the save flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSaveResponse {
    /// Whether the commit succeeded.
    pub ok: bool,
    /// Whether a new date was created (vs. an existing entry edited).
    pub created: bool,
    /// One-time signal to present the reminder prompt.
    pub prompt_reminder: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Response envelope for the list read path.
#[derive(Debug, Clone, PartialEq)]
pub struct LogListResponse {
    /// Entries in date-ascending order (empty on failure).
    pub items: Vec<LogItem>,
    pub message: String,
}

/// One month bucket of the yearly rating distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionBucketItem {
    pub key: String,
    pub count: u32,
    /// Mean rating; absent when the month has no rated entry.
    pub value: Option<f64>,
}

/// Response envelope for the yearly distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionResponse {
    pub buckets: Vec<DistributionBucketItem>,
    /// Whether enough months have data to chart the real distribution.
    pub sufficient: bool,
    /// How many more non-empty months are needed when insufficient.
    pub deficit: u32,
    pub message: String,
}

/// Saves one day's log entry, creating or editing as appropriate.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `prompt_reminder` is set on the one-time second-entry milestone.
#[flutter_rust_bridge::frb(sync)]
pub fn save_log(
    date: String,
    rating: u8,
    message: String,
    tags: Vec<LogTagItem>,
    reminder_enabled: bool,
) -> LogSaveResponse {
    let result = parse_date(&date).and_then(|date| {
        let tags = tags
            .into_iter()
            .map(to_core_tag)
            .collect::<Result<Vec<_>, String>>()?;

        with_log_service(|service| {
            let mut session = EditingSession::for_date(service, date);
            session.set_rating(rating);
            session.set_message(message.clone());
            for tag in tags {
                session.add_tag(tag);
            }

            let settings = Settings {
                reminder_enabled,
                ..Settings::new()
            };
            session
                .commit(service, &settings, &LogFileAnalytics)
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(outcome) => LogSaveResponse {
            ok: true,
            created: outcome.created,
            prompt_reminder: outcome.prompt_reminder,
            message: "Log saved.".to_string(),
        },
        Err(err) => LogSaveResponse {
            ok: false,
            created: false,
            prompt_reminder: false,
            message: format!("save_log failed: {err}"),
        },
    }
}

/// Deletes the entry for `date`. Deleting a missing date succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_log(date: String) -> LogActionResponse {
    let result = parse_date(&date).and_then(|date| {
        with_log_service(|service| {
            let session = EditingSession::for_date(service, date);
            session
                .delete(service, &LogFileAnalytics)
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(_) => LogActionResponse {
            ok: true,
            message: "Log deleted.".to_string(),
        },
        Err(err) => LogActionResponse {
            ok: false,
            message: format!("delete_log failed: {err}"),
        },
    }
}

/// Lists all stored entries, date-ascending.
#[flutter_rust_bridge::frb(sync)]
pub fn list_logs() -> LogListResponse {
    match with_log_service(|service| Ok(service.snapshot())) {
        Ok(entries) => LogListResponse {
            items: entries.iter().map(to_log_item).collect(),
            message: format!("{} entries.", entries.len()),
        },
        Err(err) => LogListResponse {
            items: Vec::new(),
            message: format!("list_logs failed: {err}"),
        },
    }
}

/// Computes the 12-month rating distribution for `year`.
#[flutter_rust_bridge::frb(sync)]
pub fn year_distribution(year: i32) -> DistributionResponse {
    match with_log_service(|service| Ok(service.snapshot())) {
        Ok(entries) => {
            let buckets = rating_distribution_for_year(year, &entries, short_month_label);
            let (sufficient, deficit) = match Sufficiency::evaluate(&buckets, MIN_ITEMS) {
                Sufficiency::Sufficient => (true, 0),
                Sufficiency::Insufficient { deficit } => (false, deficit as u32),
            };
            DistributionResponse {
                buckets: buckets
                    .into_iter()
                    .map(|b| DistributionBucketItem {
                        key: b.key,
                        count: b.count,
                        value: b.value,
                    })
                    .collect(),
                sufficient,
                deficit,
                message: format!("Distribution for {year}."),
            }
        }
        Err(err) => DistributionResponse {
            buckets: Vec::new(),
            sufficient: false,
            deficit: MIN_ITEMS as u32,
            message: format!("year_distribution failed: {err}"),
        },
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}

fn to_core_tag(item: LogTagItem) -> Result<Tag, String> {
    let id = Uuid::parse_str(&item.id).map_err(|_| format!("invalid tag id `{}`", item.id))?;
    let mut tag = Tag::with_id(id, item.title);
    tag.emoji = item.emoji;
    Ok(tag)
}

fn to_log_item(entry: &moodlog_core::LogEntry) -> LogItem {
    LogItem {
        date: entry.date_key(),
        // Entries inside the store always carry a rating.
        rating: entry.rating.unwrap_or_default(),
        message: entry.message.clone(),
        tags: entry
            .tags
            .iter()
            .map(|tag| LogTagItem {
                id: tag.id.to_string(),
                title: tag.title.clone(),
                emoji: tag.emoji.clone(),
            })
            .collect(),
    }
}

fn resolve_journal_db_path() -> PathBuf {
    JOURNAL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MOODLOG_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(JOURNAL_DB_FILE_NAME)
        })
        .clone()
}

fn with_log_service<T>(
    f: impl FnOnce(&mut LogService<SqliteLogRepository>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_journal_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("journal DB open failed: {err}"))?;
    let mut service = LogService::open(SqliteLogRepository::new(conn))
        .map_err(|err| format!("journal load failed: {err}"))?;
    f(&mut service)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, delete_log, init_logging, list_logs, ping, save_log, year_distribution,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn save_log_rejects_malformed_date() {
        let response = save_log(
            "03/01/2024".to_string(),
            4,
            String::new(),
            Vec::new(),
            true,
        );
        assert!(!response.ok);
        assert!(response.message.contains("invalid date"));
    }

    #[test]
    fn save_log_rejects_out_of_scale_rating() {
        let response = save_log("1999-01-01".to_string(), 9, String::new(), Vec::new(), true);
        assert!(!response.ok);
    }

    #[test]
    fn save_then_list_then_delete_round_trip() {
        let saved = save_log(
            "1988-07-15".to_string(),
            4,
            "ffi round trip".to_string(),
            Vec::new(),
            true,
        );
        assert!(saved.ok, "{}", saved.message);

        let listed = list_logs();
        assert!(listed
            .items
            .iter()
            .any(|item| item.date == "1988-07-15" && item.message == "ffi round trip"));

        let deleted = delete_log("1988-07-15".to_string());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!list_logs().items.iter().any(|item| item.date == "1988-07-15"));
    }

    #[test]
    fn year_distribution_always_has_twelve_buckets() {
        let response = year_distribution(1977);
        assert_eq!(response.buckets.len(), 12);
        assert!(!response.sufficient);
    }
}
