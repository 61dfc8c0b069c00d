//! Journey: forecast the level-up and today's vocabulary lessons
//!
//! 1. A learner two days into a level plans with default settings
//! 2. The radicals pass, the kanji unlock and get learned five a day
//! 3. The last kanji to pass sets the level-up
//! 4. Vocabulary is spread over the days left

use chrono::Duration;
use levelcast_core::{
    Assignment, Milestone, PassTime, Planner, PlannerSettings, ReferenceTime, SubjectKind,
    TimeBucket,
};
use levelcast_e2e_tests::mocks::{test_now, SnapshotFactory};

/// Hours from stage 0 to passing on the standard system
const STAGE_ZERO_TO_PASS: i64 = 84;

#[test]
fn test_level_in_progress_forecast() {
    let now = test_now();
    let planner = Planner::new(
        SnapshotFactory::level_in_progress(4, now).build(),
        PlannerSettings::default(),
    );
    let report = planner.run(&ReferenceTime::utc(now));

    // Radical 1 passes in 6h, its four kanji then take 84h.
    // The queued radical passes at +84h; its kanji have ranks 4 and 5,
    // so the second one waits a day.
    let early = now + Duration::hours(6 + STAGE_ZERO_TO_PASS);
    let mid = now + Duration::hours(2 * STAGE_ZERO_TO_PASS);
    let late = mid + Duration::days(1);

    assert_eq!(
        report.unlock_schedule,
        vec![
            TimeBucket { at: early, count: 4 },
            TimeBucket { at: mid, count: 1 },
            TimeBucket { at: late, count: 1 },
        ]
    );
    // All six kanji are needed: ceil(6 * 0.9) = 6
    assert_eq!(report.milestone, Milestone::At(late));
    assert_eq!(report.available_now, 4);
    assert_eq!(report.learned_today, 0);
    assert_eq!(report.until_milestone, Some(4 + 5));
    // 8 days until level-up, plus the level-up day
    assert_eq!(report.recommended_per_day, Some(1));
    assert!(report.faults.is_empty());
}

#[test]
fn test_level_up_day_setting() {
    let now = test_now();
    let snapshot = SnapshotFactory::level_in_progress(4, now).build();
    let clock = ReferenceTime::utc(now);

    let mut planner = Planner::new(snapshot, PlannerSettings::default());
    let with_day = planner.run(&clock);

    planner.update_settings(PlannerSettings {
        include_level_up_day: false,
        ..Default::default()
    });
    let without_day = planner.run(&clock);

    assert_eq!(with_day.milestone, without_day.milestone);
    // 9 over 9 days vs 9 over 8 days
    assert_eq!(with_day.recommended_per_day, Some(1));
    assert_eq!(without_day.recommended_per_day, Some(2));
}

#[test]
fn test_cleared_level() {
    let now = test_now();
    let planner = Planner::new(
        SnapshotFactory::level_cleared(9, now).build(),
        PlannerSettings::default(),
    );
    let report = planner.run(&ReferenceTime::utc(now));

    assert_eq!(report.milestone, Milestone::Reached);
    assert_eq!(report.recommended_per_day, None);
    assert_eq!(report.until_milestone, None);
    assert_eq!(report.available_now, 3);
}

#[test]
fn test_vocabulary_waits_for_its_latest_kanji() {
    let now = test_now();
    let mut factory = SnapshotFactory::new(2);
    let due = now + Duration::hours(1);
    let fast = factory.kanji(&[], Some(Assignment::in_review(4, due, now)));
    let slow = factory.kanji(&[], Some(Assignment::in_review(3, due, now)));
    let vocab = factory.vocabulary(&[fast, slow], None);
    let reversed = factory.vocabulary(&[slow, fast], None);

    let planner = Planner::new(factory.build(), PlannerSettings::default());
    let clock = ReferenceTime::utc(now);
    let projector = planner.projector(clock);
    let mut ctx = planner.new_context(&clock);

    // Stage 3 still needs the 2-day interval after its next review
    let slow_pass = due + Duration::days(2);
    assert_eq!(projector.project(&mut ctx, slow).unwrap(), PassTime::Pending(slow_pass));
    projector.project(&mut ctx, vocab).unwrap();
    projector.project(&mut ctx, reversed).unwrap();
    assert_eq!(ctx.unlock_time(vocab), Some(slow_pass));
    assert_eq!(ctx.unlock_time(reversed), Some(slow_pass));
}

#[test]
fn test_other_level_planning() {
    let now = test_now();
    let mut factory = SnapshotFactory::level_in_progress(4, now);
    // A kanji from the next level, unlocking off the queued radical
    factory.subject(SubjectKind::Kanji, 5, &[3], None);

    let planner = Planner::new(factory.build(), PlannerSettings::default()).with_level(5);
    let report = planner.run(&ReferenceTime::utc(now));

    assert_eq!(report.user_level, 5);
    // Ranked behind the six level 4 kanji: rank 6 -> one day late
    let expected = now + Duration::hours(2 * STAGE_ZERO_TO_PASS) + Duration::days(1);
    assert_eq!(report.milestone, Milestone::At(expected));
}

#[test]
fn test_planning_is_reproducible() {
    let now = test_now();
    let planner = Planner::new(
        SnapshotFactory::level_in_progress(4, now).build(),
        PlannerSettings::default(),
    );
    let clock = ReferenceTime::utc(now);
    let first = planner.run(&clock);
    let second = planner.run(&clock);
    assert_eq!(first, second);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["milestone"]["status"], "at");
    assert_eq!(json["recommendedPerDay"], 1);
}
