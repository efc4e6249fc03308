//! Yearly rating distribution and sufficiency gating.
//!
//! # Responsibility
//! - Partition a year's entries into 12 month buckets of count + mean.
//! - Keep the numeric fold separate from display-label concerns.
//!
//! # Invariants
//! - Output is always exactly 12 buckets, January through December.
//! - `value` is `None` if and only if `count` is 0.
//! - Entries outside the target year never leak into any bucket.
//! - Entries without a rating contribute to neither count nor mean.

use crate::model::log_entry::LogEntry;
use chrono::Datelike;

/// Months per aggregation period.
pub const MONTHS_PER_YEAR: usize = 12;

const MONTH_LETTERS: [&str; MONTHS_PER_YEAR] =
    ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];

/// One month's aggregate of rated entries.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionBucket {
    /// Display label for the period, supplied by the caller's labeler.
    pub key: String,
    /// Number of rated entries in the period.
    pub count: u32,
    /// Arithmetic mean rating, `None` when the period has no rated entry.
    pub value: Option<f64>,
}

/// Default month labeler: first letter of the English month name.
pub fn short_month_label(month_index: usize) -> String {
    MONTH_LETTERS
        .get(month_index)
        .copied()
        .unwrap_or("?")
        .to_string()
}

/// Folds `entries` into the 12-bucket rating distribution for `year`.
///
/// `month_label` maps a month index (0 = January) to the bucket key;
/// localization lives entirely in that function.
pub fn rating_distribution_for_year<F>(
    year: i32,
    entries: &[LogEntry],
    month_label: F,
) -> Vec<DistributionBucket>
where
    F: Fn(usize) -> String,
{
    let mut counts = [0u32; MONTHS_PER_YEAR];
    let mut sums = [0u64; MONTHS_PER_YEAR];

    for entry in entries {
        if entry.date.year() != year {
            continue;
        }
        let Some(rating) = entry.rating else {
            continue;
        };
        let month = entry.date.month0() as usize;
        counts[month] += 1;
        sums[month] += u64::from(rating);
    }

    (0..MONTHS_PER_YEAR)
        .map(|month| DistributionBucket {
            key: month_label(month),
            count: counts[month],
            value: if counts[month] == 0 {
                None
            } else {
                Some(sums[month] as f64 / f64::from(counts[month]))
            },
        })
        .collect()
}

/// Outcome of the data-sufficiency check for a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sufficiency {
    /// Enough non-empty buckets to render the real distribution.
    Sufficient,
    /// Too few non-empty buckets; `deficit` more are needed.
    Insufficient { deficit: usize },
}

impl Sufficiency {
    /// Compares the number of buckets with a non-null value against
    /// `min_items`. Presentation policy layered on top of the pure fold.
    pub fn evaluate(buckets: &[DistributionBucket], min_items: usize) -> Self {
        let filled = buckets.iter().filter(|b| b.value.is_some()).count();
        if filled >= min_items {
            Self::Sufficient
        } else {
            Self::Insufficient {
                deficit: min_items - filled,
            }
        }
    }

    pub fn is_sufficient(self) -> bool {
        matches!(self, Self::Sufficient)
    }
}
