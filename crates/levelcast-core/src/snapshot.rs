//! Snapshot of the learner's data
//!
//! A fully materialized, read-only view of everything the projection needs:
//! the user's level, the SRS systems, and the subjects within range.
//! Fetching it is somebody else's job; we only read the JSON.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::srs::SrsSystem;
use crate::subject::{Subject, SubjectId, SubjectKind};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Snapshot loading error
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot result type
pub type Result<T> = std::result::Result<T, SnapshotError>;

// ============================================================================
// SNAPSHOT
// ============================================================================

/// The data snapshot the engine projects over
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The learner's current level
    pub user_level: u32,
    #[serde(default)]
    pub srs_systems: Vec<SrsSystem>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(skip)]
    index: SubjectIndex,
}

impl Snapshot {
    /// Build a snapshot and index its subjects
    pub fn new(user_level: u32, srs_systems: Vec<SrsSystem>, subjects: Vec<Subject>) -> Self {
        let mut snapshot = Self {
            user_level,
            srs_systems,
            subjects,
            index: SubjectIndex::default(),
        };
        snapshot.reindex();
        snapshot
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.reindex();
        Ok(snapshot)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            subjects = snapshot.subjects.len(),
            srs_systems = snapshot.srs_systems.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    fn reindex(&mut self) {
        self.index = SubjectIndex::build(&self.subjects);
    }

    /// Look up a subject by id
    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.index.get(id).map(|pos| &self.subjects[pos])
    }

    /// All subjects of one kind, in snapshot order.
    ///
    /// Shadowed duplicates are skipped.
    pub fn of_kind(&self, kind: SubjectKind) -> impl Iterator<Item = &Subject> {
        self.subjects
            .iter()
            .enumerate()
            .filter(move |&(pos, s)| s.kind == kind && self.index.get(s.id) == Some(pos))
            .map(|(_, s)| s)
    }

    /// Number of distinct subjects
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Subjects of one kind on a given level
    pub fn of_kind_at_level(
        &self,
        kind: SubjectKind,
        level: u32,
    ) -> impl Iterator<Item = &Subject> {
        self.of_kind(kind).filter(move |s| s.level == level)
    }
}

// ============================================================================
// SUBJECT INDEX
// ============================================================================

/// Subject id -> position in `Snapshot::subjects`
///
/// Duplicate ids keep their first occurrence.
#[derive(Debug, Clone, Default)]
pub struct SubjectIndex {
    positions: HashMap<SubjectId, usize>,
}

impl SubjectIndex {
    fn build(subjects: &[Subject]) -> Self {
        let mut positions = HashMap::with_capacity(subjects.len());
        for (pos, subject) in subjects.iter().enumerate() {
            if positions.contains_key(&subject.id) {
                tracing::warn!(
                    subject_id = subject.id,
                    "Duplicate subject in snapshot, keeping the first"
                );
                continue;
            }
            positions.insert(subject.id, pos);
        }
        Self { positions }
    }

    fn get(&self, id: SubjectId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
