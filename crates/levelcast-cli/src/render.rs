//! Text rendering of plans and timing tables

use std::fmt::Write;

use chrono::{DateTime, Timelike, Utc};
use colored::Colorize;
use levelcast_core::clock::{DAY_MILLIS, WEEK_MILLIS};
use levelcast_core::{Milestone, PlannerReport, ReferenceTime, TimingTable};

use crate::config::CliSettings;

/// Width of the widest unlock bar, in cells
const BAR_WIDTH: usize = 24;

/// Width of the time label column
const LABEL_WIDTH: usize = 16;

/// Human label for a projected instant, relative to the run's `now`.
///
/// - `After reviews`: same minute as now
/// - `Today 14:00`: later today
/// - `Thu 09:30`: within a week
/// - `24.12 09:30`: beyond a week
pub fn time_label(at: DateTime<Utc>, clock: &ReferenceTime) -> String {
    let diff = (at - clock.now()).num_milliseconds();
    let local = at.with_timezone(&clock.offset());
    let now = clock.now().with_timezone(&clock.offset());

    if diff > WEEK_MILLIS {
        return local.format("%d.%m %H:%M").to_string();
    }
    if diff < DAY_MILLIS && clock.is_today(at) {
        if local.hour() == now.hour() && local.minute() == now.minute() {
            return "After reviews".to_string();
        }
        return local.format("Today %H:%M").to_string();
    }
    local.format("%a %H:%M").to_string()
}

/// One row of the unlock overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockRow {
    /// Vocabulary already waiting in the lesson queue
    Unlocked { count: usize },
    /// The projected level-up
    LevelUp { label: String },
    /// Vocabulary unlocking at one instant, with the running total
    Unlock {
        label: String,
        count: usize,
        total: usize,
    },
}

/// Rows of the unlock overview.
///
/// The level-up row goes before the first bucket at or after the
/// milestone, or last when every bucket comes earlier.
pub fn unlock_rows(report: &PlannerReport, clock: &ReferenceTime) -> Vec<UnlockRow> {
    let mut rows = Vec::with_capacity(report.unlock_schedule.len() + 2);
    if report.available_now > 0 {
        rows.push(UnlockRow::Unlocked {
            count: report.available_now,
        });
    }

    let mut level_up = report.milestone.at();
    let mut total = report.available_now;
    for bucket in &report.unlock_schedule {
        if let Some(at) = level_up.filter(|&at| at <= bucket.at) {
            rows.push(UnlockRow::LevelUp {
                label: time_label(at, clock),
            });
            level_up = None;
        }
        total += bucket.count;
        rows.push(UnlockRow::Unlock {
            label: time_label(bucket.at, clock),
            count: bucket.count,
            total,
        });
    }
    if let Some(at) = level_up {
        rows.push(UnlockRow::LevelUp {
            label: time_label(at, clock),
        });
    }
    rows
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let cells = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(cells)
}

/// Unlock overview as a table
pub fn render_unlocks(report: &PlannerReport, clock: &ReferenceTime) -> String {
    let rows = unlock_rows(report, clock);
    let max = report
        .unlock_schedule
        .iter()
        .map(|b| b.count)
        .chain(std::iter::once(report.available_now))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{}", "Vocabulary unlocks".white().bold());
    if rows.is_empty() {
        let _ = writeln!(out, "  {}", "Nothing left to unlock".dimmed());
        return out;
    }
    for row in rows {
        let _ = match row {
            UnlockRow::Unlocked { count } => writeln!(
                out,
                "  {:<LABEL_WIDTH$} {:<BAR_WIDTH$} {:>5} {:>6}",
                "Unlocked",
                bar(count, max).magenta(),
                "",
                count
            ),
            UnlockRow::LevelUp { label } => writeln!(
                out,
                "  {:<LABEL_WIDTH$} {}",
                label,
                "Level Up!".yellow().bold()
            ),
            UnlockRow::Unlock {
                label,
                count,
                total,
            } => writeln!(
                out,
                "  {:<LABEL_WIDTH$} {:<BAR_WIDTH$} {:>5} {:>6}",
                label,
                bar(count, max).magenta(),
                format!("+{count}").green(),
                total
            ),
        };
    }
    out
}

/// Today's vocabulary progress.
///
/// `None` without a recommendation, when the recommendation is zero or
/// when nothing is available to learn.
pub fn progress_line(report: &PlannerReport) -> Option<String> {
    let recommended = report.recommended_per_day?;
    if recommended == 0 || report.available_now == 0 {
        return None;
    }
    let done = report.learned_today >= recommended as usize;
    let counts = format!("{}/{} vocab", report.learned_today, recommended);
    let counts = if done {
        counts.green().bold()
    } else {
        counts.white().bold()
    };
    let percent = report.progress_today().unwrap_or(1.0) * 100.0;
    Some(format!("{}: {} ({:.0}%)", "Today".white().bold(), counts, percent))
}

fn milestone_text(milestone: &Milestone, clock: &ReferenceTime) -> String {
    match milestone {
        Milestone::Unknown => "unknown".dimmed().to_string(),
        Milestone::Reached => "reached".green().to_string(),
        Milestone::At(at) => format!(
            "{} ({})",
            time_label(*at, clock),
            at.with_timezone(&clock.offset()).format("%Y-%m-%d %H:%M")
        ),
    }
}

/// Full text view of a plan
pub fn render_report(
    report: &PlannerReport,
    settings: &CliSettings,
    clock: &ReferenceTime,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("=== Level {} Plan ===", report.user_level).cyan().bold()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}: {}",
        "Level Up".white().bold(),
        milestone_text(&report.milestone, clock)
    );
    let _ = writeln!(out, "{}: {}", "Available Now".white().bold(), report.available_now);
    let _ = writeln!(out, "{}: {}", "Learned Today".white().bold(), report.learned_today);
    if let Some(until) = report.until_milestone {
        let _ = writeln!(out, "{}: {}", "Until Level Up".white().bold(), until);
    }

    if settings.show_recommendation {
        let _ = writeln!(out);
        match report.recommended_per_day {
            Some(per_day) => {
                let _ = writeln!(
                    out,
                    "{}: {}",
                    "Recommended".white().bold(),
                    format!("{per_day} vocab/day").cyan()
                );
                if let Some(line) = progress_line(report) {
                    let _ = writeln!(out, "{line}");
                }
            }
            None => {
                let _ = writeln!(
                    out,
                    "{}: {}",
                    "Recommended".white().bold(),
                    "unknown".dimmed()
                );
            }
        }
    }

    if settings.show_unlocks {
        let _ = writeln!(out);
        out.push_str(&render_unlocks(report, clock));
    }

    if !report.faults.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            format!("{} subject(s) could not be projected:", report.faults.len()).yellow()
        );
        for fault in &report.faults {
            let _ = writeln!(out, "  {} {}", fault.subject_id, fault.reason.dimmed());
        }
    }
    out
}

/// Compact duration, e.g. `3d 12h`
pub fn format_seconds(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    match (days, hours, minutes) {
        (0, 0, m) => format!("{m}m"),
        (0, h, 0) => format!("{h}h"),
        (0, h, m) => format!("{h}h {m}m"),
        (d, 0, _) => format!("{d}d"),
        (d, h, _) => format!("{d}d {h}h"),
    }
}

/// Seconds-to-passing per stage for every SRS system
pub fn render_timings(timings: &TimingTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=== SRS Timing Tables ===".cyan().bold());
    if timings.is_empty() {
        let _ = writeln!(out, "{}", "No SRS systems in snapshot".dimmed());
        return out;
    }
    for (system_id, remaining) in timings.iter() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {} (passing stage {})",
            "System".white().bold(),
            system_id,
            remaining.len()
        );
        for (stage, seconds) in remaining.iter().enumerate() {
            let _ = writeln!(
                out,
                "  stage {:>2}  {:>10}s  {}",
                stage,
                seconds,
                format_seconds(*seconds).dimmed()
            );
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
