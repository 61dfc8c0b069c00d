//! Timing tables: cumulative seconds remaining until the passing review.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::SrsSystem;

/// Cap on seconds-to-pass (100 years), keeps pass times inside the calendar
pub const MAX_SECONDS_TO_PASS: u64 = 100 * 365 * 86_400;

/// SRS system id -> seconds remaining to pass, indexed by stage
///
/// `remaining_seconds(system)[k]` is the time an item spends waiting from the
/// moment it enters stage `k`'s interval until its passing review is due.
/// The last entry is the own interval of the stage right below passing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingTable {
    tables: HashMap<u32, Vec<u64>>,
}

impl TimingTable {
    /// Table for a single system, `None` if the system is unknown
    pub fn remaining_seconds(&self, system_id: u32) -> Option<&[u64]> {
        self.tables.get(&system_id).map(Vec::as_slice)
    }

    /// Passing stage of a system (stages at or above it are passed)
    pub fn passing_stage(&self, system_id: u32) -> Option<u32> {
        self.tables.get(&system_id).map(|t| t.len() as u32)
    }

    pub fn contains(&self, system_id: u32) -> bool {
        self.tables.contains_key(&system_id)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate systems in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u64])> {
        let mut ids: Vec<u32> = self.tables.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
            .map(move |id| (id, self.tables[&id].as_slice()))
    }
}

/// Build the timing table for every SRS system.
///
/// Built back to front: the stage right below passing holds its own
/// interval, every earlier stage adds its interval to the following entry.
/// Sums are capped at [`MAX_SECONDS_TO_PASS`] and a passing stage beyond the
/// defined stages is lowered to the first position after the last one.
pub fn build_timing_table(systems: &[SrsSystem]) -> TimingTable {
    let mut tables = HashMap::with_capacity(systems.len());

    for system in systems {
        let defined = system
            .stages
            .iter()
            .map(|s| s.position as usize + 1)
            .max()
            .unwrap_or(0);
        let mut passing = system.passing_stage_position as usize;
        if passing > defined {
            tracing::warn!(
                system_id = system.id,
                passing_stage = passing,
                defined_stages = defined,
                "Passing stage lies beyond the defined stages, lowering it"
            );
            passing = defined;
        }
        let mut remaining = vec![0u64; passing];

        let mut acc = 0u64;
        for k in (0..passing).rev() {
            let interval = system
                .stage(k as u32)
                .map(|s| s.interval_seconds())
                .unwrap_or(0);
            acc = acc.saturating_add(interval).min(MAX_SECONDS_TO_PASS);
            remaining[k] = acc;
        }

        tracing::debug!(
            system_id = system.id,
            passing_stage = passing,
            seconds_to_pass = remaining.first().copied().unwrap_or(0),
            "Built SRS timing table"
        );
        tables.insert(system.id, remaining);
    }

    TimingTable { tables }
}

// ============================================================================
// TESTS
// ============================================================================
