//! Lesson Order Normalization
//!
//! The data source hands out a raw `lesson_position` per subject. Those are
//! sparse and shared across kinds, so for throttling we need a dense,
//! zero-based rank within each group of not-yet-started subjects of one kind.

use std::collections::HashMap;

use crate::snapshot::Snapshot;
use crate::subject::{SubjectId, SubjectKind};

/// Subject id -> dense lesson rank within its kind group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonOrder {
    ranks: HashMap<SubjectId, u32>,
}

impl LessonOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank a group of `(id, raw_position)` pairs and record the ranks.
    ///
    /// Sorted by raw position, ties by id. Ranks are `0..n-1` in that order.
    /// Merge every batch belonging to the same group before calling this;
    /// calling it twice for one kind restarts ranking at 0.
    pub fn normalize_group<I>(&mut self, group: I)
    where
        I: IntoIterator<Item = (SubjectId, u32)>,
    {
        // A repeated id keeps the position it was last seen with
        let positions: HashMap<SubjectId, u32> = group.into_iter().collect();
        let mut entries: Vec<(SubjectId, u32)> = positions.into_iter().collect();
        entries.sort_by_key(|&(id, position)| (position, id));

        for (rank, (id, _)) in entries.into_iter().enumerate() {
            self.ranks.insert(id, rank as u32);
        }
    }

    /// Standard lesson order for a snapshot.
    ///
    /// Radicals: those waiting in the lesson queue. Kanji: locked ones and
    /// those in the lesson queue, ranked together so that kanji unlocked
    /// later queue up behind the ones already available.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut order = Self::new();

        order.normalize_group(
            snapshot
                .of_kind(SubjectKind::Radical)
                .filter(|s| s.is_in_lesson_queue())
                .map(|s| (s.id, s.lesson_position)),
        );

        let locked_kanji = snapshot
            .of_kind(SubjectKind::Kanji)
            .filter(|s| s.is_locked());
        let queued_kanji = snapshot
            .of_kind(SubjectKind::Kanji)
            .filter(|s| s.is_in_lesson_queue());
        order.normalize_group(
            locked_kanji
                .chain(queued_kanji)
                .map(|s| (s.id, s.lesson_position)),
        );

        tracing::debug!(ranked = order.len(), "Normalized lesson order");
        order
    }

    /// Rank of a subject, `None` if it was never in a ranked group
    pub fn rank(&self, id: SubjectId) -> Option<u32> {
        self.ranks.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
