//! Pass-Time Projection
//!
//! Projects, for every subject of interest, the instant it will reach its
//! passing SRS stage:
//! - Started or available subjects project from their own assignment
//! - Locked subjects unlock when the last of their components passes
//! - Newly available radicals/kanji can be throttled to a daily cap
//!
//! Results are memoized in a [`ProjectionContext`] owned by one run.

mod context;
mod projector;
mod throttle;

pub use context::{ProjectionContext, StartedToday};
pub use projector::{stage_time, Projector};
pub use throttle::lesson_offset;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::SubjectId;

// ============================================================================
// PASS TIME
// ============================================================================

/// Projected pass time of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "at", rename_all = "lowercase")]
pub enum PassTime {
    /// Already at or beyond the passing stage; no future pass event
    Passed,
    /// Will pass at this instant
    Pending(DateTime<Utc>),
}

impl PassTime {
    /// The pending instant, `None` if already passed
    pub fn pending(&self) -> Option<DateTime<Utc>> {
        match self {
            PassTime::Passed => None,
            PassTime::Pending(at) => Some(*at),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, PassTime::Passed)
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Projection error
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    /// The component graph loops back onto a subject still being projected
    #[error("Component cycle through subject {id} (path: {path:?})")]
    Cycle { id: SubjectId, path: Vec<SubjectId> },
    /// Asked to project a subject the snapshot doesn't contain
    #[error("Subject not in snapshot: {0}")]
    UnknownSubject(SubjectId),
}

/// Projection result type
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// A subject that could not be projected, kept for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionFault {
    pub subject_id: SubjectId,
    pub reason: String,
}

impl ProjectionFault {
    pub fn new(subject_id: SubjectId, error: &ProjectionError) -> Self {
        Self {
            subject_id,
            reason: error.to_string(),
        }
    }
}
