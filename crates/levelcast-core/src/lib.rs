//! # Levelcast Core
//!
//! Progression projection engine for level-based SRS learning (WaniKani-style
//! radicals, kanji and vocabulary). Given a read-only snapshot of subjects and
//! assignments, it projects:
//!
//! - **Timing Tables**: cumulative seconds from any SRS stage to the passing stage
//! - **Lesson Order**: dense per-kind ranks used to throttle new lessons per day
//! - **Pass Times**: when each subject reaches its passing stage, walking the
//!   component graph for locked subjects (memoized, cycle-checked)
//! - **Level-Up**: the earliest instant at which 90% of the level's kanji pass
//! - **Lessons per Day**: the vocabulary rate that clears the queue by level-up
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use levelcast_core::{Planner, PlannerSettings, ReferenceTime, Snapshot};
//!
//! let snapshot = Snapshot::load("snapshot.json")?;
//! let planner = Planner::new(snapshot, PlannerSettings::default());
//!
//! let report = planner.run(&ReferenceTime::utc(chrono::Utc::now()));
//! println!("{:?} vocab/day until {:?}", report.recommended_per_day, report.milestone);
//! ```
//!
//! Nothing here mutates the learner's data, and nothing here does I/O apart
//! from [`Snapshot::load`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod bucket;
pub mod clock;
pub mod lesson_order;
pub mod milestone;
pub mod planner;
pub mod projection;
pub mod recommend;
pub mod settings;
pub mod snapshot;
pub mod srs;
pub mod subject;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Data model
pub use snapshot::{Snapshot, SnapshotError};
pub use srs::{
    build_timing_table, IntervalUnit, SrsStage, SrsSystem, TimingTable, MAX_SECONDS_TO_PASS,
};
pub use subject::{Assignment, Subject, SubjectId, SubjectKind};

// Projection engine
pub use bucket::{group_by_time, TimeBucket};
pub use clock::ReferenceTime;
pub use lesson_order::LessonOrder;
pub use milestone::{
    cohort_for_level, estimate_milestone, quorum, Milestone, LEVEL_UP_QUORUM_PERCENT,
};
pub use projection::{
    lesson_offset, stage_time, PassTime, ProjectionContext, ProjectionError, ProjectionFault,
    Projector, StartedToday,
};
pub use recommend::{recommend_per_day, RecommenderInputs};

// Facade
pub use planner::{Planner, PlannerReport};
pub use settings::PlannerSettings;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Milestone, PassTime, Planner, PlannerReport, PlannerSettings, ReferenceTime, Snapshot,
        SnapshotError, SubjectId, SubjectKind, TimeBucket,
    };
}
