//! Time buckets: subjects grouped by identical projected instant.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// All subjects sharing one projected instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub at: DateTime<Utc>,
    pub count: usize,
}

/// Group instants into buckets, ascending by instant.
///
/// `None` entries (nothing to project) are dropped.
pub fn group_by_time<I>(instants: I) -> Vec<TimeBucket>
where
    I: IntoIterator<Item = Option<DateTime<Utc>>>,
{
    let mut counts: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();
    for at in instants.into_iter().flatten() {
        *counts.entry(at).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(at, count)| TimeBucket { at, count })
        .collect()
}

/// Total number of subjects across buckets
pub fn total(buckets: &[TimeBucket]) -> usize {
    buckets.iter().map(|b| b.count).sum()
}
