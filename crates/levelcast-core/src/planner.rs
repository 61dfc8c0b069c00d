//! Planner - one full projection run
//!
//! Wires the pipeline together:
//! 1. Project pass times of all locked vocabulary (which pulls in their kanji
//!    and radicals)
//! 2. Bucket the vocabulary unlock times
//! 3. Project the current level's kanji and estimate the level-up
//! 4. Recommend vocabulary lessons per day

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bucket::{group_by_time, total, TimeBucket};
use crate::clock::ReferenceTime;
use crate::lesson_order::LessonOrder;
use crate::milestone::{cohort_for_level, estimate_milestone, Milestone};
use crate::projection::{ProjectionContext, ProjectionFault, Projector, StartedToday};
use crate::recommend::{available_now, learned_today, recommend_per_day, RecommenderInputs};
use crate::settings::PlannerSettings;
use crate::snapshot::Snapshot;
use crate::srs::{build_timing_table, TimingTable};
use crate::subject::{SubjectId, SubjectKind};

/// Result of a planning run, ready for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerReport {
    pub now: DateTime<Utc>,
    pub user_level: u32,
    /// When locked vocabulary unlocks, ascending
    pub unlock_schedule: Vec<TimeBucket>,
    pub milestone: Milestone,
    /// Vocabulary waiting in the lesson queue
    pub available_now: usize,
    /// Vocabulary of this level learned today
    pub learned_today: usize,
    /// Vocabulary to learn between today and the level-up
    pub until_milestone: Option<usize>,
    pub recommended_per_day: Option<u32>,
    /// Subjects that could not be projected
    pub faults: Vec<ProjectionFault>,
}

impl PlannerReport {
    /// Share of today's recommendation already done, 0.0 - 1.0
    pub fn progress_today(&self) -> Option<f64> {
        match self.recommended_per_day {
            Some(0) | None => None,
            Some(recommended) => {
                Some((self.learned_today as f64 / f64::from(recommended)).min(1.0))
            }
        }
    }
}

/// Projection engine over one snapshot
///
/// Timing tables and lesson order are derived once; every [`Planner::run`]
/// starts from a fresh [`ProjectionContext`].
#[derive(Debug, Clone)]
pub struct Planner {
    snapshot: Snapshot,
    settings: PlannerSettings,
    timings: TimingTable,
    lesson_order: LessonOrder,
    level: u32,
}

impl Planner {
    pub fn new(snapshot: Snapshot, settings: PlannerSettings) -> Self {
        for warning in settings.warnings() {
            tracing::warn!("{}", warning);
        }
        let timings = build_timing_table(&snapshot.srs_systems);
        let lesson_order = LessonOrder::from_snapshot(&snapshot);
        let level = snapshot.user_level;
        Self {
            snapshot,
            settings,
            timings,
            lesson_order,
            level,
        }
    }

    /// Plan for a level other than the snapshot's user level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn timings(&self) -> &TimingTable {
        &self.timings
    }

    pub fn lesson_order(&self) -> &LessonOrder {
        &self.lesson_order
    }

    /// Replace the settings. Later runs project from scratch.
    pub fn update_settings(&mut self, settings: PlannerSettings) {
        for warning in settings.warnings() {
            tracing::warn!("{}", warning);
        }
        self.settings = settings;
    }

    /// A projector bound to this planner's data
    pub fn projector(&self, clock: ReferenceTime) -> Projector<'_> {
        Projector::new(
            &self.snapshot,
            &self.timings,
            &self.lesson_order,
            &self.settings,
            clock,
        )
    }

    /// A fresh context carrying today's started radical/kanji counts
    pub fn new_context(&self, clock: &ReferenceTime) -> ProjectionContext {
        ProjectionContext::new(StartedToday {
            radicals: learned_today(&self.snapshot, SubjectKind::Radical, self.level, clock) as u32,
            kanji: learned_today(&self.snapshot, SubjectKind::Kanji, self.level, clock) as u32,
        })
    }

    /// Run the full pipeline against `clock`
    pub fn run(&self, clock: &ReferenceTime) -> PlannerReport {
        let projector = self.projector(*clock);
        let mut ctx = self.new_context(clock);

        let locked_vocab: Vec<SubjectId> = self
            .snapshot
            .of_kind(SubjectKind::Vocabulary)
            .filter(|s| s.is_locked())
            .map(|s| s.id)
            .collect();
        projector.project_many(&mut ctx, locked_vocab.iter().copied());
        let unlock_schedule = group_by_time(locked_vocab.iter().map(|&id| ctx.unlock_time(id)));

        // Kanji whose vocabulary is all unlocked weren't reached above
        let cohort = cohort_for_level(&self.snapshot, SubjectKind::Kanji, self.level);
        projector.project_many(&mut ctx, cohort.iter().copied());
        let milestone = estimate_milestone(&cohort, &ctx);

        let inputs = RecommenderInputs {
            available_now: available_now(&self.snapshot),
            milestone,
            learned_today: learned_today(
                &self.snapshot,
                SubjectKind::Vocabulary,
                self.level,
                clock,
            ),
            unlocks: unlock_schedule,
            include_level_up_day: self.settings.include_level_up_day,
        };
        let recommended_per_day = recommend_per_day(&inputs, clock);

        tracing::debug!(
            level = self.level,
            projected = ctx.len(),
            locked_vocab = locked_vocab.len(),
            unlocking = total(&inputs.unlocks),
            cohort = cohort.len(),
            faults = ctx.faults().len(),
            ?milestone,
            ?recommended_per_day,
            "Projection run complete"
        );

        PlannerReport {
            now: clock.now(),
            user_level: self.level,
            until_milestone: inputs.until_milestone(),
            unlock_schedule: inputs.unlocks,
            milestone,
            available_now: inputs.available_now,
            learned_today: inputs.learned_today,
            recommended_per_day,
            faults: ctx.faults().to_vec(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
