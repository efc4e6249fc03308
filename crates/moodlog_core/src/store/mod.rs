//! Keyed log store with a reducer-style mutation protocol.
//!
//! # Responsibility
//! - Hold the authoritative collection of log entries, one per date.
//! - Funnel every mutation through a single checked reduction step.
//!
//! # Invariants
//! - At most one entry per date key; the map key space enforces this.
//! - Mutations are total: either key presence and value both change, or
//!   neither does.
//! - Entries inside the store always carry a committed rating.
//! - State after a sequence of applies is the left-to-right fold of the
//!   actions; there is no reordering or coalescing.

use crate::model::log_entry::{LogEntry, LogValidationError};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Contract violations raised by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `edit` targeted a date with no stored entry.
    MissingEntry(NaiveDate),
    /// `add`/`edit` carried a draft entry with an unset rating.
    DraftEntry(NaiveDate),
    /// Entry payload failed scale validation.
    Validation(LogValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEntry(date) => write!(f, "no log entry stored for {date}"),
            Self::DraftEntry(date) => {
                write!(f, "entry for {date} has no rating and cannot be stored")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LogValidationError> for StoreError {
    fn from(value: LogValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Closed set of store mutations, each carrying the entry payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogAction {
    /// Insert a new entry. Auto-resolves to an edit when the date exists,
    /// so duplicate dispatches converge instead of corrupting state.
    Add(LogEntry),
    /// Replace rating/message/tags of an existing entry wholesale.
    Edit(LogEntry),
    /// Remove the entry for the payload's date. Missing key is a no-op.
    Delete(LogEntry),
}

impl LogAction {
    /// Date key targeted by this action.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Add(entry) | Self::Edit(entry) | Self::Delete(entry) => entry.date,
        }
    }
}

/// What a successful apply did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// A new date key was inserted.
    Inserted,
    /// An existing entry was replaced in place.
    Replaced,
    /// An entry was removed.
    Removed,
    /// Nothing changed (delete of a missing key).
    Noop,
}

impl Mutation {
    /// Whether the collection content changed at all.
    pub fn changed(self) -> bool {
        !matches!(self, Self::Noop)
    }
}

/// In-memory keyed collection of log entries.
///
/// Date-ascending iteration falls out of the ordered key space, so
/// snapshots need no extra sorting step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStore {
    entries: BTreeMap<NaiveDate, LogEntry>,
}

impl LogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded collection, last entry per date wins.
    ///
    /// Used by the persistence load path at startup.
    pub fn from_entries(entries: Vec<LogEntry>) -> StoreResult<Self> {
        let mut store = Self::new();
        for entry in entries {
            store.apply(LogAction::Add(entry))?;
        }
        Ok(store)
    }

    /// Applies one action to the collection.
    ///
    /// This is the only mutation path and the only place invariants are
    /// checked. Errors leave the collection untouched.
    pub fn apply(&mut self, action: LogAction) -> StoreResult<Mutation> {
        match action {
            LogAction::Add(entry) => {
                self.check_storable(&entry)?;
                let existed = self.entries.insert(entry.date, entry).is_some();
                Ok(if existed {
                    Mutation::Replaced
                } else {
                    Mutation::Inserted
                })
            }
            LogAction::Edit(entry) => {
                self.check_storable(&entry)?;
                if !self.entries.contains_key(&entry.date) {
                    return Err(StoreError::MissingEntry(entry.date));
                }
                self.entries.insert(entry.date, entry);
                Ok(Mutation::Replaced)
            }
            LogAction::Delete(entry) => Ok(if self.entries.remove(&entry.date).is_some() {
                Mutation::Removed
            } else {
                Mutation::Noop
            }),
        }
    }

    /// Returns the entry stored for `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&LogEntry> {
        self.entries.get(&date)
    }

    /// Returns whether an entry exists for `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Number of stored entries. Meaningful on its own: feature unlocks
    /// and the reminder milestone compare against it.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned date-ascending view of the collection.
    ///
    /// Callers never get a handle into internal storage; readers treat
    /// the snapshot as immutable.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.values().cloned().collect()
    }

    fn check_storable(&self, entry: &LogEntry) -> StoreResult<()> {
        if entry.is_draft() {
            return Err(StoreError::DraftEntry(entry.date));
        }
        entry.validate()?;
        Ok(())
    }
}
