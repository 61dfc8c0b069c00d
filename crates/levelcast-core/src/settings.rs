//! Planner settings
//!
//! How the learner intends to study: whether the level-up day still counts
//! as a study day, and how many new radicals/kanji get introduced per day.

use serde::{Deserialize, Serialize};

use crate::subject::SubjectKind;

/// Default number of new radicals or kanji per day
pub const DEFAULT_ITEMS_PER_DAY: u32 = 5;

/// Settings consumed by the projection and the recommender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerSettings {
    /// Count the level-up day itself as a full study day
    #[serde(alias = "includeMilestoneDay")]
    pub include_level_up_day: bool,
    /// Assume all available radicals are learned as one batch
    pub learn_all_radicals_at_once: bool,
    /// Radicals introduced per day when not learning all at once
    pub radicals_per_day: u32,
    /// Assume all available kanji are learned as one batch
    pub learn_all_kanji_at_once: bool,
    /// Kanji introduced per day when not learning all at once
    pub kanji_per_day: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            include_level_up_day: true,
            learn_all_radicals_at_once: false,
            radicals_per_day: DEFAULT_ITEMS_PER_DAY,
            learn_all_kanji_at_once: false,
            kanji_per_day: DEFAULT_ITEMS_PER_DAY,
        }
    }
}

impl PlannerSettings {
    /// Daily cap for a kind, `None` when that kind isn't throttled.
    ///
    /// Vocabulary is never throttled; that's what the recommendation is for.
    pub fn daily_cap(&self, kind: SubjectKind) -> Option<u32> {
        let (all_at_once, per_day) = match kind {
            SubjectKind::Radical => (self.learn_all_radicals_at_once, self.radicals_per_day),
            SubjectKind::Kanji => (self.learn_all_kanji_at_once, self.kanji_per_day),
            SubjectKind::Vocabulary => return None,
        };
        (!all_at_once && per_day > 0).then_some(per_day)
    }

    /// Human-readable problems with these settings. None of them are fatal.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.learn_all_radicals_at_once && self.radicals_per_day == 0 {
            warnings.push("radicalsPerDay is 0, radical throttling disabled".to_string());
        }
        if !self.learn_all_kanji_at_once && self.kanji_per_day == 0 {
            warnings.push("kanjiPerDay is 0, kanji throttling disabled".to_string());
        }
        warnings
    }
}

// ============================================================================
// TESTS
// ============================================================================
