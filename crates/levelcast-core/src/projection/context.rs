//! Per-run projection state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{PassTime, ProjectionFault};
use crate::subject::{SubjectId, SubjectKind};

/// How many throttled subjects of each kind were started today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartedToday {
    pub radicals: u32,
    pub kanji: u32,
}

impl StartedToday {
    pub fn for_kind(&self, kind: SubjectKind) -> u32 {
        match kind {
            SubjectKind::Radical => self.radicals,
            SubjectKind::Kanji => self.kanji,
            SubjectKind::Vocabulary => 0,
        }
    }
}

/// Memoized state of one projection run
///
/// Create a fresh context whenever the snapshot, the settings or `now`
/// change. Reusing one across those would serve stale projections.
#[derive(Debug, Clone, Default)]
pub struct ProjectionContext {
    pass_times: HashMap<SubjectId, PassTime>,
    unlock_times: HashMap<SubjectId, DateTime<Utc>>,
    /// Subjects currently being resolved, innermost last
    in_progress: Vec<SubjectId>,
    faults: Vec<ProjectionFault>,
    started_today: StartedToday,
}

impl ProjectionContext {
    pub fn new(started_today: StartedToday) -> Self {
        Self {
            started_today,
            ..Default::default()
        }
    }

    pub fn started_today(&self) -> StartedToday {
        self.started_today
    }

    /// Memoized pass time, if already projected
    pub fn pass_time(&self, id: SubjectId) -> Option<PassTime> {
        self.pass_times.get(&id).copied()
    }

    /// Memoized unlock time of a locked subject
    pub fn unlock_time(&self, id: SubjectId) -> Option<DateTime<Utc>> {
        self.unlock_times.get(&id).copied()
    }

    /// Number of projected subjects
    pub fn len(&self) -> usize {
        self.pass_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pass_times.is_empty()
    }

    pub fn faults(&self) -> &[ProjectionFault] {
        &self.faults
    }

    /// Drop all memoized projections and faults, keep today's counts
    pub fn clear(&mut self) {
        self.pass_times.clear();
        self.unlock_times.clear();
        self.in_progress.clear();
        self.faults.clear();
    }

    pub(super) fn record_pass_time(&mut self, id: SubjectId, pass_time: PassTime) {
        self.pass_times.insert(id, pass_time);
    }

    pub(super) fn record_unlock_time(&mut self, id: SubjectId, at: DateTime<Utc>) {
        self.unlock_times.insert(id, at);
    }

    pub(super) fn record_fault(&mut self, fault: ProjectionFault) {
        if !self.faults.iter().any(|f| f.subject_id == fault.subject_id) {
            self.faults.push(fault);
        }
    }

    pub(super) fn is_in_progress(&self, id: SubjectId) -> bool {
        self.in_progress.contains(&id)
    }

    pub(super) fn enter(&mut self, id: SubjectId) {
        self.in_progress.push(id);
    }

    pub(super) fn leave(&mut self) {
        self.in_progress.pop();
    }

    /// Current resolution path ending in `id`
    pub(super) fn path_to(&self, id: SubjectId) -> Vec<SubjectId> {
        let mut path = self.in_progress.clone();
        path.push(id);
        path
    }
}
