//! Subject module - the items being learned
//!
//! Each subject is one learnable item with:
//! - A kind (radical, kanji, vocabulary)
//! - The level it belongs to
//! - Component subjects that must pass before it unlocks
//! - An optional assignment (the learner's progress on it)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subject identifier as issued by the data source
pub type SubjectId = u32;

// ============================================================================
// SUBJECT KIND
// ============================================================================

/// Kind of subject
///
/// Radicals are roots, kanji gate the level-up, vocabulary depends on kanji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Radical,
    Kanji,
    Vocabulary,
}

impl SubjectKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Radical => "radical",
            SubjectKind::Kanji => "kanji",
            SubjectKind::Vocabulary => "vocabulary",
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "radical" | "rad" => Ok(SubjectKind::Radical),
            "kanji" | "kan" => Ok(SubjectKind::Kanji),
            "vocabulary" | "voc" | "vocab" => Ok(SubjectKind::Vocabulary),
            _ => Err(format!("Unknown subject kind: {}", s)),
        }
    }
}

// ============================================================================
// ASSIGNMENT
// ============================================================================

/// The learner's progress on an unlocked subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Current SRS stage (0 = waiting in the lesson queue)
    pub srs_stage: u32,
    /// When the next review becomes available; absent until the lesson is done
    #[serde(default)]
    pub available_at: Option<DateTime<Utc>>,
    /// When the lesson was done
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Unlocked, lesson not yet done
    pub fn lesson_queue() -> Self {
        Self {
            srs_stage: 0,
            available_at: None,
            started_at: None,
        }
    }

    /// Started at `started_at`, sitting on `srs_stage` until `available_at`
    pub fn in_review(
        srs_stage: u32,
        available_at: DateTime<Utc>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            srs_stage,
            available_at: Some(available_at),
            started_at: Some(started_at),
        }
    }
}

// ============================================================================
// SUBJECT
// ============================================================================

/// A subject in the snapshot. The engine never modifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub kind: SubjectKind,
    pub level: u32,
    pub srs_system_id: u32,
    /// Prerequisites; empty for radicals
    #[serde(default)]
    pub component_ids: Vec<SubjectId>,
    /// Raw position within the level's lesson order
    #[serde(default)]
    pub lesson_position: u32,
    /// `None` while the subject is still locked
    #[serde(default)]
    pub assignment: Option<Assignment>,
}

impl Subject {
    pub fn is_locked(&self) -> bool {
        self.assignment.is_none()
    }

    /// Current SRS stage, `None` while locked
    pub fn srs_stage(&self) -> Option<u32> {
        self.assignment.as_ref().map(|a| a.srs_stage)
    }

    /// Unlocked and waiting in the lesson queue
    pub fn is_in_lesson_queue(&self) -> bool {
        self.srs_stage() == Some(0)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.assignment.as_ref().and_then(|a| a.started_at)
    }
}

// ============================================================================
// TESTS
// ============================================================================
