//! Transient editing session for one day's log entry.
//!
//! # Responsibility
//! - Hold the not-yet-committed draft built across the rating/tags/note
//!   steps of the editing flow.
//! - Route the finished draft into the store as an add or edit.
//!
//! # Invariants
//! - A session is a value owned by the calling flow, never shared state;
//!   `commit` and `delete` and `discard` consume it, so no mutation can
//!   follow a terminal transition.
//! - Field setters are order-independent: stepping back in the UI never
//!   loses already-entered data.
//! - `commit` requires a set rating; nothing reaches the store otherwise.

use crate::analytics::{entry_properties, AnalyticsSink};
use crate::model::log_entry::LogEntry;
use crate::model::settings::Settings;
use crate::model::tag::{Tag, TagId};
use crate::repo::log_repo::LogRepository;
use crate::service::log_service::LogService;
use crate::store::{LogAction, Mutation, StoreError, StoreResult};
use chrono::NaiveDate;
use log::info;
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store size at which the one-time reminder prompt is triggered.
const REMINDER_MILESTONE_SIZE: usize = 2;

/// Errors raised when terminating a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `commit` was called while the draft rating was still unset.
    RatingUnset(NaiveDate),
    /// The store rejected the dispatched action.
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RatingUnset(date) => {
                write!(f, "cannot commit log for {date} without a rating")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RatingUnset(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of a committed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The entry as it now exists in the store.
    pub entry: LogEntry,
    /// Whether the commit inserted a new date (vs. editing an existing one).
    pub created: bool,
    /// One-time signal: the store just reached its second-ever entry and
    /// the reminder preference is still unset, so the caller should
    /// present the reminder prompt.
    pub prompt_reminder: bool,
}

/// Mutable draft of one day's entry, owned by the active editing flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingSession {
    date: NaiveDate,
    rating: Option<u8>,
    message: String,
    tags: Vec<Tag>,
    existed: bool,
}

impl EditingSession {
    /// Starts a create-flow session with empty defaults.
    pub fn create(date: NaiveDate) -> Self {
        Self {
            date,
            rating: None,
            message: String::new(),
            tags: Vec::new(),
            existed: false,
        }
    }

    /// Starts an edit-flow session seeded from a stored entry.
    pub fn resume(entry: &LogEntry) -> Self {
        Self {
            date: entry.date,
            rating: entry.rating,
            message: entry.message.clone(),
            tags: entry.tags.clone(),
            existed: true,
        }
    }

    /// Opens a session for `date`, seeding from the store when an entry
    /// already exists. The add-vs-edit choice is fixed here, at session
    /// start.
    pub fn for_date<R: LogRepository>(service: &LogService<R>, date: NaiveDate) -> Self {
        match service.get(date) {
            Some(entry) => Self::resume(entry),
            None => Self::create(date),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Whether the target date had a stored entry when the session began.
    pub fn edits_existing(&self) -> bool {
        self.existed
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.rating = Some(rating);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Removes every occurrence of the tag id from the draft.
    pub fn remove_tag(&mut self, id: TagId) {
        self.tags.retain(|tag| tag.id != id);
    }

    /// Current draft as an entry value. Still a draft if the rating is unset.
    pub fn draft(&self) -> LogEntry {
        LogEntry {
            date: self.date,
            rating: self.rating,
            message: self.message.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Commits the draft into the store.
    ///
    /// Dispatches an add or edit depending on whether the date pre-existed
    /// at session start, then evaluates the one-time reminder milestone
    /// against the resulting store size.
    pub fn commit<R: LogRepository>(
        self,
        service: &mut LogService<R>,
        settings: &Settings,
        analytics: &dyn AnalyticsSink,
    ) -> Result<CommitOutcome, SessionError> {
        let rating = self.rating.ok_or(SessionError::RatingUnset(self.date))?;
        let entry = LogEntry::new(self.date, rating, self.message, self.tags);

        let props = entry_properties(&entry);
        analytics.track("log_saved", props.clone());
        analytics.track(
            if self.existed { "log_changed" } else { "log_created" },
            props,
        );

        let action = if self.existed {
            LogAction::Edit(entry.clone())
        } else {
            LogAction::Add(entry.clone())
        };
        let mutation = service.dispatch(action)?;

        let prompt_reminder = mutation == Mutation::Inserted
            && service.len() == REMINDER_MILESTONE_SIZE
            && !settings.reminder_enabled;
        if prompt_reminder {
            analytics.track("reminder_modal_open", json!({}));
        }

        info!(
            "event=log_commit module=session status=ok date={} created={} prompt_reminder={}",
            entry.date_key(),
            mutation == Mutation::Inserted,
            prompt_reminder
        );

        Ok(CommitOutcome {
            entry,
            created: mutation == Mutation::Inserted,
            prompt_reminder,
        })
    }

    /// Deletes the session's target entry from the store.
    ///
    /// Deleting a date with no stored entry is a no-op, mirroring the
    /// store's delete idempotence.
    pub fn delete<R: LogRepository>(
        self,
        service: &mut LogService<R>,
        analytics: &dyn AnalyticsSink,
    ) -> StoreResult<Mutation> {
        analytics.track("log_deleted", json!({ "date": self.draft().date_key() }));
        service.dispatch(LogAction::Delete(self.draft()))
    }

    /// Terminates the session with no store mutation.
    pub fn discard(self, analytics: &dyn AnalyticsSink) {
        analytics.track("log_cancelled", json!({ "date": self.draft().date_key() }));
    }
}
