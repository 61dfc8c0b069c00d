//! Snapshot Factory
//!
//! Builds realistic snapshots for end-to-end tests:
//! - Subjects with auto-assigned ids and lesson positions
//! - Component wiring radical -> kanji -> vocabulary
//! - Pre-built level scenarios

use chrono::{DateTime, Duration, TimeZone, Utc};
use levelcast_core::{Assignment, Snapshot, SrsSystem, Subject, SubjectId, SubjectKind};

/// SRS system id used by every factory subject unless overridden
pub const DEFAULT_SYSTEM_ID: u32 = 1;

/// Fixed reference time for journeys: Monday 2024-09-02 08:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()
}

/// Factory for snapshots
///
/// # Example
///
/// ```rust,ignore
/// let mut factory = SnapshotFactory::new(5);
/// let radical = factory.radical(Some(Assignment::in_review(4, now, now)));
/// let kanji = factory.kanji(&[radical], None);
/// factory.vocabulary(&[kanji], None);
///
/// let snapshot = factory.build();
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotFactory {
    level: u32,
    systems: Vec<SrsSystem>,
    subjects: Vec<Subject>,
    next_id: SubjectId,
    system_id: u32,
}

impl SnapshotFactory {
    /// Empty snapshot at `level` with the standard SRS system
    pub fn new(level: u32) -> Self {
        Self {
            level,
            systems: vec![SrsSystem::wanikani_default(DEFAULT_SYSTEM_ID)],
            subjects: Vec::new(),
            next_id: 1,
            system_id: DEFAULT_SYSTEM_ID,
        }
    }

    /// Add another SRS system
    pub fn with_system(mut self, system: SrsSystem) -> Self {
        self.systems.push(system);
        self
    }

    /// SRS system for subjects added from now on
    pub fn use_system(&mut self, system_id: u32) -> &mut Self {
        self.system_id = system_id;
        self
    }

    /// Add a subject of any kind and level; returns its id.
    ///
    /// Lesson position follows insertion order.
    pub fn subject(
        &mut self,
        kind: SubjectKind,
        level: u32,
        components: &[SubjectId],
        assignment: Option<Assignment>,
    ) -> SubjectId {
        let id = self.next_id;
        self.next_id += 1;
        self.subjects.push(Subject {
            id,
            kind,
            level,
            srs_system_id: self.system_id,
            component_ids: components.to_vec(),
            lesson_position: id,
            assignment,
        });
        id
    }

    /// Add a radical at the factory's level
    pub fn radical(&mut self, assignment: Option<Assignment>) -> SubjectId {
        self.subject(SubjectKind::Radical, self.level, &[], assignment)
    }

    /// Add a kanji at the factory's level
    pub fn kanji(&mut self, components: &[SubjectId], assignment: Option<Assignment>) -> SubjectId {
        self.subject(SubjectKind::Kanji, self.level, components, assignment)
    }

    /// Add a vocabulary item at the factory's level
    pub fn vocabulary(
        &mut self,
        components: &[SubjectId],
        assignment: Option<Assignment>,
    ) -> SubjectId {
        self.subject(SubjectKind::Vocabulary, self.level, components, assignment)
    }

    /// Add `count` vocabulary items waiting in the lesson queue
    pub fn queued_vocabulary(&mut self, count: usize) -> Vec<SubjectId> {
        (0..count)
            .map(|_| self.vocabulary(&[], Some(Assignment::lesson_queue())))
            .collect()
    }

    /// Push a raw subject, e.g. with a duplicate id or a dangling reference
    pub fn push_raw(&mut self, subject: Subject) -> &mut Self {
        self.next_id = self.next_id.max(subject.id + 1);
        self.subjects.push(subject);
        self
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(self.level, self.systems, self.subjects)
    }

    /// Snapshot as the camelCase JSON the loader reads
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "userLevel": self.level,
            "srsSystems": self.systems,
            "subjects": self.subjects,
        })
    }

    // ========================================================================
    // SCENARIOS
    // ========================================================================

    /// A level two days in.
    ///
    /// - 2 radicals one review from passing, due in 6 hours
    /// - 1 radical still in the lesson queue
    /// - 6 locked kanji: four on the first radical, two on the queued one
    /// - 1 locked vocabulary per kanji
    /// - 4 vocabulary in the lesson queue
    pub fn level_in_progress(level: u32, now: DateTime<Utc>) -> Self {
        let mut factory = Self::new(level);
        let started = now - Duration::days(2);
        let due = now + Duration::hours(6);

        let first = factory.radical(Some(Assignment::in_review(4, due, started)));
        let _second = factory.radical(Some(Assignment::in_review(4, due, started)));
        let queued = factory.radical(Some(Assignment::lesson_queue()));

        let mut kanji = Vec::new();
        for _ in 0..4 {
            kanji.push(factory.kanji(&[first], None));
        }
        for _ in 0..2 {
            kanji.push(factory.kanji(&[queued], None));
        }
        for id in kanji {
            factory.vocabulary(&[id], None);
        }
        factory.queued_vocabulary(4);
        factory
    }

    /// A level whose kanji have all passed
    pub fn level_cleared(level: u32, now: DateTime<Utc>) -> Self {
        let mut factory = Self::new(level);
        let started = now - Duration::days(10);
        for _ in 0..5 {
            factory.kanji(&[], Some(Assignment::in_review(5, now + Duration::days(5), started)));
        }
        factory.queued_vocabulary(3);
        factory
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_positions_follow_insertion() {
        let mut factory = SnapshotFactory::new(3);
        let r = factory.radical(None);
        let k = factory.kanji(&[r], None);
        assert_eq!((r, k), (1, 2));
        assert_eq!(factory.subjects()[1].lesson_position, 2);
        assert_eq!(factory.subjects()[1].component_ids, vec![1]);
    }

    #[test]
    fn test_json_round_trips_through_loader() {
        let factory = SnapshotFactory::level_in_progress(4, test_now());
        let json = factory.to_json().to_string();
        let snapshot = Snapshot::from_json_str(&json).unwrap();
        assert_eq!(snapshot.user_level, 4);
        assert_eq!(snapshot.len(), factory.subjects().len());
    }
}
