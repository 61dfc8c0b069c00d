//! The recursive, memoized pass-time projector.

use chrono::{DateTime, Duration, Utc};

use super::{lesson_offset, PassTime, ProjectionContext, ProjectionError, ProjectionFault, Result};
use crate::clock::ReferenceTime;
use crate::lesson_order::LessonOrder;
use crate::settings::PlannerSettings;
use crate::snapshot::Snapshot;
use crate::srs::TimingTable;
use crate::subject::{Subject, SubjectId};

/// Pass time of a subject sitting on `stage` whose next review is due at
/// `available_at` (or right away if that lies in the past or is absent).
///
/// An unknown SRS system yields `Passed`, same as any missing reference:
/// it must not hold anything else back.
pub fn stage_time(
    timings: &TimingTable,
    system_id: u32,
    stage: u32,
    available_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> PassTime {
    let next = available_at.map_or(now, |at| at.max(now));

    let Some(remaining) = timings.remaining_seconds(system_id) else {
        tracing::warn!(system_id, "Unknown SRS system, treating subject as passed");
        return PassTime::Passed;
    };

    let passing = remaining.len() as u32;
    if stage >= passing {
        return PassTime::Passed;
    }
    if stage + 1 == passing {
        return PassTime::Pending(next);
    }

    let seconds_to_pass = remaining[(stage + 1) as usize];
    let wait = i64::try_from(seconds_to_pass)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX);
    PassTime::Pending(offset_by(next, wait))
}

/// `at + by`, saturating at the end of the representable calendar
fn offset_by(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    at.checked_add_signed(by).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Projects pass times over one snapshot
///
/// Holds only shared references; all mutable state lives in the
/// [`ProjectionContext`] passed to each call.
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    snapshot: &'a Snapshot,
    timings: &'a TimingTable,
    lesson_order: &'a LessonOrder,
    settings: &'a PlannerSettings,
    clock: ReferenceTime,
}

impl<'a> Projector<'a> {
    pub fn new(
        snapshot: &'a Snapshot,
        timings: &'a TimingTable,
        lesson_order: &'a LessonOrder,
        settings: &'a PlannerSettings,
        clock: ReferenceTime,
    ) -> Self {
        Self {
            snapshot,
            timings,
            lesson_order,
            settings,
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Project the pass time of one subject.
    ///
    /// Memoized: a second call within the same context returns the cached
    /// value without touching the subject again.
    pub fn project(&self, ctx: &mut ProjectionContext, id: SubjectId) -> Result<PassTime> {
        if let Some(cached) = ctx.pass_time(id) {
            return Ok(cached);
        }
        let subject = self
            .snapshot
            .subject(id)
            .ok_or(ProjectionError::UnknownSubject(id))?;
        self.project_subject(ctx, subject)
    }

    /// Project many subjects, skipping the ones that fail.
    ///
    /// Failures are logged and recorded as faults on the context so a
    /// single broken subject never blocks the rest of the cohort.
    /// Returns how many subjects were projected.
    pub fn project_many<I>(&self, ctx: &mut ProjectionContext, ids: I) -> usize
    where
        I: IntoIterator<Item = SubjectId>,
    {
        let mut projected = 0;
        for id in ids {
            match self.project(ctx, id) {
                Ok(_) => projected += 1,
                Err(e) => {
                    tracing::warn!(subject_id = id, "Skipping subject: {}", e);
                    ctx.record_fault(ProjectionFault::new(id, &e));
                }
            }
        }
        projected
    }

    fn project_subject(&self, ctx: &mut ProjectionContext, subject: &Subject) -> Result<PassTime> {
        if let Some(cached) = ctx.pass_time(subject.id) {
            return Ok(cached);
        }

        let now = self.clock.now();
        let pass_time = match &subject.assignment {
            Some(assignment) => {
                // Already progressing on its own, or waiting in the lesson queue
                let available_at = match assignment.available_at {
                    Some(at) => at,
                    None => offset_by(now, self.throttle_offset(ctx, subject)),
                };
                stage_time(
                    self.timings,
                    subject.srs_system_id,
                    assignment.srs_stage,
                    Some(available_at),
                    now,
                )
            }
            None => {
                let unlock_at = self.unlock_time(ctx, subject)?;
                let available_at = offset_by(unlock_at, self.throttle_offset(ctx, subject));
                stage_time(self.timings, subject.srs_system_id, 0, Some(available_at), now)
            }
        };

        ctx.record_pass_time(subject.id, pass_time);
        Ok(pass_time)
    }

    /// Latest pass time among the components of a locked subject.
    ///
    /// Components outside the snapshot passed on an earlier level and don't
    /// limit anything. With no limiting component the subject unlocks now.
    fn unlock_time(&self, ctx: &mut ProjectionContext, subject: &Subject) -> Result<DateTime<Utc>> {
        if let Some(cached) = ctx.unlock_time(subject.id) {
            return Ok(cached);
        }

        ctx.enter(subject.id);
        let latest = self.latest_component_pass(ctx, subject);
        ctx.leave();

        let unlock_at = latest?.unwrap_or_else(|| self.clock.now());
        ctx.record_unlock_time(subject.id, unlock_at);
        Ok(unlock_at)
    }

    fn latest_component_pass(
        &self,
        ctx: &mut ProjectionContext,
        subject: &Subject,
    ) -> Result<Option<DateTime<Utc>>> {
        let mut latest: Option<DateTime<Utc>> = None;

        for &component_id in &subject.component_ids {
            let pass_time = match ctx.pass_time(component_id) {
                Some(cached) => cached,
                None => {
                    if ctx.is_in_progress(component_id) {
                        return Err(ProjectionError::Cycle {
                            id: component_id,
                            path: ctx.path_to(component_id),
                        });
                    }
                    let Some(component) = self.snapshot.subject(component_id) else {
                        continue;
                    };
                    self.project_subject(ctx, component)?
                }
            };

            if let Some(at) = pass_time.pending() {
                latest = Some(latest.map_or(at, |l| l.max(at)));
            }
        }

        Ok(latest)
    }

    fn throttle_offset(&self, ctx: &ProjectionContext, subject: &Subject) -> Duration {
        match self.settings.daily_cap(subject.kind) {
            Some(per_day) => lesson_offset(
                self.lesson_order.rank(subject.id),
                per_day,
                ctx.started_today().for_kind(subject.kind),
            ),
            None => Duration::zero(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
