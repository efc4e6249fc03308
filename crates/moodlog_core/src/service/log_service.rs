//! Log store use-case service.
//!
//! # Responsibility
//! - Apply reducer actions and schedule persistence of the collection.
//! - Expose read paths for calendar, statistics and unlock logic.
//!
//! # Invariants
//! - Persistence is fire-and-forget: a failed save is logged and never
//!   rolls back the in-memory mutation.
//! - Actions are applied in dispatch order; no coalescing.

use crate::model::log_entry::LogEntry;
use crate::repo::log_repo::{LogRepository, RepoError, RepoResult};
use crate::stats::STATISTIC_MIN_LOGS;
use crate::store::{LogAction, LogStore, Mutation, StoreResult};
use chrono::NaiveDate;
use log::{debug, warn};

/// Store plus its persistence collaborator.
///
/// The in-memory store remains the source of truth for the running
/// session; the repository trails it after every successful mutation.
pub struct LogService<R: LogRepository> {
    store: LogStore,
    repo: R,
}

impl<R: LogRepository> LogService<R> {
    /// Opens the service by restoring the persisted collection.
    pub fn open(repo: R) -> RepoResult<Self> {
        let entries = repo.load_all()?;
        let store = LogStore::from_entries(entries)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        Ok(Self { store, repo })
    }

    /// Applies one action, then saves the full collection.
    ///
    /// Save failure is absorbed here: the mutation stays applied and the
    /// failure is only logged.
    pub fn dispatch(&mut self, action: LogAction) -> StoreResult<Mutation> {
        let date = action.date();
        let mutation = self.store.apply(action)?;

        if mutation.changed() {
            let snapshot = self.store.snapshot();
            match self.repo.replace_all(&snapshot) {
                Ok(()) => debug!(
                    "event=log_persist module=store status=ok date={date} size={}",
                    snapshot.len()
                ),
                Err(err) => warn!(
                    "event=log_persist module=store status=error date={date} error={err}"
                ),
            }
        }

        Ok(mutation)
    }

    /// Date-ascending immutable view of the collection.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.store.snapshot()
    }

    /// Returns the entry stored for `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&LogEntry> {
        self.store.get(date)
    }

    /// Returns whether an entry exists for `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.store.contains(date)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether enough entries exist to unlock the statistics surfaces.
    pub fn statistics_unlocked(&self) -> bool {
        self.store.len() >= STATISTIC_MIN_LOGS
    }
}
