//! Milestone (level-up) estimation
//!
//! A level is cleared once a quorum of its kanji have passed. Given the
//! projected pass times of that cohort, find the earliest instant at which
//! the quorum is met.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bucket::group_by_time;
use crate::projection::{PassTime, ProjectionContext};
use crate::snapshot::Snapshot;
use crate::subject::{SubjectId, SubjectKind};

/// Share of the cohort that must pass, in percent
pub const LEVEL_UP_QUORUM_PERCENT: usize = 90;

/// Projected milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "at", rename_all = "lowercase")]
pub enum Milestone {
    /// Empty cohort, or the quorum can't be reached from what was projected
    Unknown,
    /// Enough of the cohort has already passed
    Reached,
    /// Projected instant of the milestone
    At(DateTime<Utc>),
}

impl Milestone {
    pub fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            Milestone::At(at) => Some(*at),
            _ => None,
        }
    }
}

/// Number of cohort members that must pass: `ceil(size * 90%)`
pub fn quorum(cohort_size: usize) -> usize {
    (cohort_size * LEVEL_UP_QUORUM_PERCENT).div_ceil(100)
}

/// Subjects of `kind` native to `level`, in snapshot order
pub fn cohort_for_level(snapshot: &Snapshot, kind: SubjectKind, level: u32) -> Vec<SubjectId> {
    snapshot
        .of_kind_at_level(kind, level)
        .map(|s| s.id)
        .collect()
}

/// Earliest instant by which at least a quorum of `cohort` has passed.
///
/// Cohort members that were never projected (faulted) count as never
/// passing.
pub fn estimate_milestone(cohort: &[SubjectId], ctx: &ProjectionContext) -> Milestone {
    if cohort.is_empty() {
        return Milestone::Unknown;
    }
    let needed = quorum(cohort.len());

    let pass_times: Vec<Option<PassTime>> = cohort.iter().map(|&id| ctx.pass_time(id)).collect();
    let mut passed = pass_times
        .iter()
        .filter(|p| matches!(p, Some(PassTime::Passed)))
        .count();
    if passed >= needed {
        return Milestone::Reached;
    }

    let buckets = group_by_time(pass_times.iter().map(|p| p.and_then(|p| p.pending())));
    for bucket in &buckets {
        passed += bucket.count;
        if passed >= needed {
            return Milestone::At(bucket.at);
        }
    }

    tracing::debug!(
        cohort = cohort.len(),
        needed,
        projected = passed,
        "Quorum unreachable from projected subjects"
    );
    Milestone::Unknown
}

// ============================================================================
// TESTS
// ============================================================================
