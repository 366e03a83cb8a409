//! Calendar, trend and weekly views over a [`CompletionLog`].
//!
//! Everything here is computed in memory from a single log; callers load the
//! entity and pass its history in.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::completion::{CompletionDate, CompletionLog};
use crate::shared::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: CompletionDate,
    /// A record exists for this day, completed or not.
    pub recorded: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStats {
    pub total_days: u32,
    pub completed_days: u32,
    /// Percentage, 0 to 100.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub stats: MonthStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: CompletionDate,
    pub completed: bool,
    /// Completion rate over the window up to and including this day.
    pub running_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Monday of the week.
    pub week_start: CompletionDate,
    pub completed_days: u32,
    pub completion_rate: f64,
}

pub const MAX_TREND_DAYS: u32 = 365;
pub const MAX_SUMMARY_WEEKS: u32 = 52;

fn rate(completed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

pub fn month_calendar(
    log: &CompletionLog,
    year: i32,
    month: u32,
) -> Result<MonthCalendar, DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::Validation("Invalid month".to_string()));
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::Validation("Invalid date".to_string()))?;
    let first_day_next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = first_day_next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| DomainError::Validation("Invalid date".to_string()))?;

    let total_days = last_day.day();
    let first = CompletionDate::new(first_day);

    let days: Vec<CalendarDay> = (0..total_days)
        .map(|offset| {
            let date = first.add_days(offset as i64);
            let record = log.find_by_date(date);
            CalendarDay {
                date,
                recorded: record.is_some(),
                completed: record.is_some_and(|r| r.completed),
            }
        })
        .collect();

    let completed_days = days.iter().filter(|d| d.completed).count() as u32;

    Ok(MonthCalendar {
        year,
        month,
        days,
        stats: MonthStats {
            total_days,
            completed_days,
            completion_rate: rate(completed_days, total_days),
        },
    })
}

/// The `days` days ending at `end`, oldest first.
pub fn completion_trend(
    log: &CompletionLog,
    end: CompletionDate,
    days: u32,
) -> Result<Vec<TrendPoint>, DomainError> {
    if days == 0 || days > MAX_TREND_DAYS {
        return Err(DomainError::Validation(format!(
            "Days must be between 1 and {}",
            MAX_TREND_DAYS
        )));
    }

    let start = end.add_days(-(days as i64 - 1));
    let mut completed_so_far = 0u32;

    Ok((0..days)
        .map(|offset| {
            let date = start.add_days(offset as i64);
            let completed = log.is_completed_on(date);
            if completed {
                completed_so_far += 1;
            }
            TrendPoint {
                date,
                completed,
                running_rate: rate(completed_so_far, offset + 1),
            }
        })
        .collect())
}

/// Monday-start weeks, oldest first, the last one containing `end`.
///
/// Days after `end` in the final week still count toward its denominator
/// of seven.
pub fn weekly_summary(
    log: &CompletionLog,
    end: CompletionDate,
    weeks: u32,
) -> Result<Vec<WeekSummary>, DomainError> {
    if weeks == 0 || weeks > MAX_SUMMARY_WEEKS {
        return Err(DomainError::Validation(format!(
            "Weeks must be between 1 and {}",
            MAX_SUMMARY_WEEKS
        )));
    }

    let current_monday = end.add_days(-(end.weekday().num_days_from_monday() as i64));
    let first_monday = current_monday.add_days(-7 * (weeks as i64 - 1));

    Ok((0..weeks)
        .map(|week| {
            let week_start = first_monday.add_days(7 * week as i64);
            let completed_days = (0..7)
                .filter(|d| log.is_completed_on(week_start.add_days(*d)))
                .count() as u32;
            WeekSummary {
                week_start,
                completed_days,
                completion_rate: rate(completed_days, 7),
            }
        })
        .collect())
}
