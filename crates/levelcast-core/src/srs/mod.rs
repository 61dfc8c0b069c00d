//! SRS Module
//!
//! Spaced-repetition system definitions as delivered by the data source:
//! - Ordered stages, each with an interval magnitude and unit
//! - The passing stage position (stage at which an item counts as learned)
//! - Cumulative "seconds remaining to pass" tables derived from them

mod timing;

pub use timing::{build_timing_table, TimingTable, MAX_SECONDS_TO_PASS};

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds in an hour
pub const SECONDS_PER_HOUR: u64 = 3_600;

/// Seconds in a day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds in a week
pub const SECONDS_PER_WEEK: u64 = 604_800;

// ============================================================================
// INTERVAL UNIT
// ============================================================================

/// Unit of a stage interval
///
/// Anything the data source sends that we don't recognize lands in
/// `Unknown` and converts to zero seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    #[serde(other)]
    Unknown,
}

impl IntervalUnit {
    /// Convert `magnitude` of this unit into whole seconds.
    ///
    /// Milliseconds are floored; `Unknown` always yields 0.
    pub fn to_seconds(self, magnitude: u64) -> u64 {
        match self {
            IntervalUnit::Milliseconds => magnitude / 1000,
            IntervalUnit::Seconds => magnitude,
            IntervalUnit::Minutes => magnitude.saturating_mul(SECONDS_PER_MINUTE),
            IntervalUnit::Hours => magnitude.saturating_mul(SECONDS_PER_HOUR),
            IntervalUnit::Days => magnitude.saturating_mul(SECONDS_PER_DAY),
            IntervalUnit::Weeks => magnitude.saturating_mul(SECONDS_PER_WEEK),
            IntervalUnit::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Milliseconds => "milliseconds",
            IntervalUnit::Seconds => "seconds",
            IntervalUnit::Minutes => "minutes",
            IntervalUnit::Hours => "hours",
            IntervalUnit::Days => "days",
            IntervalUnit::Weeks => "weeks",
            IntervalUnit::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SRS SYSTEM
// ============================================================================

/// One stage of an SRS system
///
/// The first stage (position 0) is the lesson stage and normally carries no
/// interval at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsStage {
    pub position: u32,
    #[serde(default)]
    pub interval: Option<u64>,
    #[serde(default)]
    pub interval_unit: Option<IntervalUnit>,
}

impl SrsStage {
    /// Stage with an interval
    pub fn new(position: u32, interval: u64, unit: IntervalUnit) -> Self {
        Self {
            position,
            interval: Some(interval),
            interval_unit: Some(unit),
        }
    }

    /// Stage without an interval (lesson stage, burned stage)
    pub fn without_interval(position: u32) -> Self {
        Self {
            position,
            interval: None,
            interval_unit: None,
        }
    }

    /// Interval of this stage in seconds, 0 when magnitude or unit is absent
    pub fn interval_seconds(&self) -> u64 {
        match (self.interval, self.interval_unit) {
            (Some(magnitude), Some(unit)) => {
                if unit == IntervalUnit::Unknown {
                    tracing::debug!(
                        position = self.position,
                        "Unrecognized interval unit, treating as 0s"
                    );
                }
                unit.to_seconds(magnitude)
            }
            _ => 0,
        }
    }
}

/// A spaced-repetition system (e.g. the regular or the accelerated one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsSystem {
    pub id: u32,
    /// Stage position at which an item is considered passed (Guru in WaniKani)
    pub passing_stage_position: u32,
    pub stages: Vec<SrsStage>,
}

impl SrsSystem {
    /// Look up a stage by its position
    pub fn stage(&self, position: u32) -> Option<&SrsStage> {
        self.stages.iter().find(|s| s.position == position)
    }

    /// The regular WaniKani system: 4h, 8h, 1d, 2d to Guru, then 1w, 2w, 1mo, 4mo.
    pub fn wanikani_default(id: u32) -> Self {
        Self {
            id,
            passing_stage_position: 5,
            stages: vec![
                SrsStage::without_interval(0),
                SrsStage::new(1, 4, IntervalUnit::Hours),
                SrsStage::new(2, 8, IntervalUnit::Hours),
                SrsStage::new(3, 1, IntervalUnit::Days),
                SrsStage::new(4, 2, IntervalUnit::Days),
                SrsStage::new(5, 1, IntervalUnit::Weeks),
                SrsStage::new(6, 2, IntervalUnit::Weeks),
                SrsStage::new(7, 730, IntervalUnit::Hours),
                SrsStage::new(8, 2922, IntervalUnit::Hours),
                SrsStage::without_interval(9),
            ],
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
