//! Statistics aggregation over the log collection.
//!
//! # Responsibility
//! - Fold log entries into per-period rating distributions.
//! - Decide data sufficiency for rendering real versus placeholder charts.
//!
//! # Invariants
//! - Aggregation is pure and locale-free; labels are injected.
//! - The store snapshot is never mutated here.

pub mod distribution;

/// Store size at which the statistics surfaces unlock.
pub const STATISTIC_MIN_LOGS: usize = 7;

/// Default number of non-empty buckets required to chart a real
/// year distribution.
pub const MIN_ITEMS: usize = 5;
