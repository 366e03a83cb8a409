use serde::{Deserialize, Serialize};

use momentum_domain::analytics::{CalendarDay, MonthCalendar, TrendPoint, WeekSummary};
use momentum_domain::completion::{CompletionDate, StreakSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummaryDto {
    pub habit_id: String,
    pub habit_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completed_days: u32,
    pub last_completed_date: Option<CompletionDate>,
}

impl StreakSummaryDto {
    pub fn new(habit_id: String, habit_name: String, summary: StreakSummary) -> Self {
        Self {
            habit_id,
            habit_name,
            current_streak: summary.current_streak,
            longest_streak: summary.longest_streak,
            total_completed_days: summary.total_completed_days,
            last_completed_date: summary.last_completed_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayDto {
    pub date: CompletionDate,
    pub recorded: bool,
    pub completed: bool,
}

impl From<CalendarDay> for CalendarDayDto {
    fn from(day: CalendarDay) -> Self {
        Self {
            date: day.date,
            recorded: day.recorded,
            completed: day.completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStatsDto {
    pub total_days: u32,
    pub completed_days: u32,
    pub completion_rate: f64, // percent, 0.0 - 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDto {
    pub habit_id: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDayDto>,
    pub month_stats: MonthStatsDto,
}

impl CalendarDto {
    pub fn new(habit_id: String, calendar: MonthCalendar) -> Self {
        Self {
            habit_id,
            year: calendar.year,
            month: calendar.month,
            days: calendar.days.into_iter().map(CalendarDayDto::from).collect(),
            month_stats: MonthStatsDto {
                total_days: calendar.stats.total_days,
                completed_days: calendar.stats.completed_days,
                completion_rate: calendar.stats.completion_rate,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointDto {
    pub date: CompletionDate,
    pub completed: bool,
    pub running_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDto {
    pub habit_id: String,
    pub start_date: CompletionDate,
    pub end_date: CompletionDate,
    pub data_points: Vec<TrendPointDto>,
}

impl TrendDto {
    pub fn new(habit_id: String, end_date: CompletionDate, points: Vec<TrendPoint>) -> Self {
        let start_date = points.first().map(|p| p.date).unwrap_or(end_date);
        Self {
            habit_id,
            start_date,
            end_date,
            data_points: points
                .into_iter()
                .map(|p| TrendPointDto {
                    date: p.date,
                    completed: p.completed,
                    running_rate: p.running_rate,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummaryDto {
    pub week_start: CompletionDate,
    pub completed_days: u32,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummaryDto {
    pub habit_id: String,
    pub weeks: Vec<WeekSummaryDto>,
}

impl WeeklySummaryDto {
    pub fn new(habit_id: String, weeks: Vec<WeekSummary>) -> Self {
        Self {
            habit_id,
            weeks: weeks
                .into_iter()
                .map(|w| WeekSummaryDto {
                    week_start: w.week_start,
                    completed_days: w.completed_days,
                    completion_rate: w.completion_rate,
                })
                .collect(),
        }
    }
}
