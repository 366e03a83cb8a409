use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::date::CompletionDate;
use super::history::CompletionLog;

/// How consecutive days are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Count the most recent completed records until the first record marked
    /// not completed. Days with no record at all do not break the streak.
    #[default]
    Forgiving,
    /// Count consecutive calendar days with a completed record, ending today,
    /// or yesterday when today has not been marked yet.
    CalendarContiguous,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completed_days: u32,
    pub last_completed_date: Option<CompletionDate>,
}

/// Current streak as of `as_of`, using [`StreakPolicy::Forgiving`].
///
/// The forgiving walk covers the whole log, newest record first. `as_of`
/// only matters for [`StreakPolicy::CalendarContiguous`].
pub fn compute_streak(log: &CompletionLog, as_of: CompletionDate) -> u32 {
    compute_streak_with(log, as_of, StreakPolicy::Forgiving)
}

pub fn compute_streak_with(log: &CompletionLog, as_of: CompletionDate, policy: StreakPolicy) -> u32 {
    match policy {
        StreakPolicy::Forgiving => forgiving_streak(log),
        StreakPolicy::CalendarContiguous => contiguous_streak(log, as_of),
    }
}

fn forgiving_streak(log: &CompletionLog) -> u32 {
    let mut streak = 0u32;
    for record in log.sorted_desc() {
        if !record.completed {
            break;
        }
        streak += 1;
    }
    streak
}

fn contiguous_streak(log: &CompletionLog, as_of: CompletionDate) -> u32 {
    let completed: HashSet<CompletionDate> = log
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.date)
        .collect();

    let mut cursor = if completed.contains(&as_of) {
        as_of
    } else if completed.contains(&as_of.previous()) {
        as_of.previous()
    } else {
        return 0;
    };

    let mut streak = 0u32;
    while completed.contains(&cursor) {
        streak += 1;
        cursor = cursor.previous();
    }
    streak
}

/// Longest run of consecutive calendar days marked completed.
pub fn longest_streak(log: &CompletionLog) -> u32 {
    let mut dates: Vec<CompletionDate> = log.iter().filter(|r| r.completed).map(|r| r.date).collect();
    dates.sort();

    let mut longest = 0u32;
    let mut current = 0u32;
    let mut previous: Option<CompletionDate> = None;

    for date in dates {
        current = match previous {
            Some(prev) if date.days_since(prev) == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(date);
    }

    longest
}

pub fn summarize(log: &CompletionLog, as_of: CompletionDate, policy: StreakPolicy) -> StreakSummary {
    let completed_dates: Vec<CompletionDate> =
        log.iter().filter(|r| r.completed).map(|r| r.date).collect();

    StreakSummary {
        current_streak: compute_streak_with(log, as_of, policy),
        longest_streak: longest_streak(log),
        total_completed_days: completed_dates.len() as u32,
        last_completed_date: completed_dates.iter().max().copied(),
    }
}
