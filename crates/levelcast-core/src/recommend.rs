//! Throughput Recommender
//!
//! How many vocabulary lessons per day clear the vocabulary queue exactly
//! by the projected level-up:
//! - Vocabulary waiting in the lesson queue right now
//! - Vocabulary unlocking before the level-up
//! - Vocabulary already learned today (today's work counts toward the goal)
//!
//! spread over the calendar days left until the level-up.

use serde::{Deserialize, Serialize};

use crate::bucket::TimeBucket;
use crate::clock::ReferenceTime;
use crate::milestone::Milestone;
use crate::snapshot::Snapshot;
use crate::subject::SubjectKind;

/// Everything the recommender needs, as plain values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommenderInputs {
    /// Vocabulary waiting in the lesson queue
    pub available_now: usize,
    /// Projected level-up
    pub milestone: Milestone,
    /// Vocabulary learned today
    pub learned_today: usize,
    /// Projected unlocks of locked vocabulary, ascending
    pub unlocks: Vec<TimeBucket>,
    /// Count the level-up day as a study day
    pub include_level_up_day: bool,
}

impl RecommenderInputs {
    /// Vocabulary to learn between the start of today and the level-up.
    ///
    /// `None` while the milestone is not a concrete instant.
    pub fn until_milestone(&self) -> Option<usize> {
        let milestone = self.milestone.at()?;
        let unlocking: usize = self
            .unlocks
            .iter()
            .take_while(|b| b.at < milestone)
            .map(|b| b.count)
            .sum();
        Some(self.available_now + unlocking + self.learned_today)
    }
}

/// Recommended vocabulary lessons per day, `None` when unknown.
///
/// Never more than what is available right now. When the level-up falls
/// on a day that doesn't count (or lies in the past), everything available
/// is due today.
pub fn recommend_per_day(inputs: &RecommenderInputs, clock: &ReferenceTime) -> Option<u32> {
    let milestone = inputs.milestone.at()?;
    let until = inputs.until_milestone()?;

    let num_days = clock.days_until(milestone) + i64::from(inputs.include_level_up_day);
    let available = inputs.available_now as u64;
    if num_days <= 0 {
        return Some(available as u32);
    }

    let per_day = (until as u64).div_ceil(num_days as u64);
    Some(per_day.min(available) as u32)
}

/// Subjects of `kind` on `level` whose lesson was done today
pub fn learned_today(
    snapshot: &Snapshot,
    kind: SubjectKind,
    level: u32,
    clock: &ReferenceTime,
) -> usize {
    snapshot
        .of_kind_at_level(kind, level)
        .filter_map(|s| s.started_at())
        .filter(|&at| clock.is_today(at))
        .count()
}

/// Vocabulary waiting in the lesson queue, any level
pub fn available_now(snapshot: &Snapshot) -> usize {
    snapshot
        .of_kind(SubjectKind::Vocabulary)
        .filter(|s| s.is_in_lesson_queue())
        .count()
}

// ============================================================================
// TESTS
// ============================================================================
