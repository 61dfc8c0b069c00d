//! Daily-cap throttling of newly introduced subjects.

use chrono::Duration;

/// Delay before a subject with lesson `rank` gets learned under a daily cap.
///
/// Today's remaining capacity is filled first. Once more than `per_day`
/// subjects of the kind were started today, today counts as spent and the
/// queue starts tomorrow. Unranked subjects and a zero cap are not delayed.
pub fn lesson_offset(rank: Option<u32>, per_day: u32, started_today: u32) -> Duration {
    let Some(rank) = rank else {
        return Duration::zero();
    };
    if per_day == 0 {
        return Duration::zero();
    }

    let day_offset = if started_today > per_day {
        rank / per_day + 1
    } else {
        rank.saturating_add(started_today) / per_day
    };
    Duration::days(i64::from(day_offset))
}
