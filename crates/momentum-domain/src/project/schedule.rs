use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionDate;
use crate::shared::DomainError;

/// Recurring work sessions for a project.
///
/// Days are kept sorted Monday first without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule", rename_all = "camelCase")]
pub struct WorkSchedule {
    days: Vec<Weekday>,
    start_time: String,
    duration_minutes: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchedule {
    days: Vec<Weekday>,
    start_time: String,
    duration_minutes: u32,
}

impl TryFrom<RawSchedule> for WorkSchedule {
    type Error = DomainError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        WorkSchedule::new(raw.days, &raw.start_time, raw.duration_minutes)
    }
}

impl WorkSchedule {
    pub const MAX_DURATION_MINUTES: u32 = 720;
    pub const MAX_RANGE_DAYS: i64 = 366;

    pub fn new(
        days: Vec<Weekday>,
        start_time: &str,
        duration_minutes: u32,
    ) -> Result<Self, DomainError> {
        if days.is_empty() {
            return Err(DomainError::Validation(
                "Work schedule needs at least one day".to_string(),
            ));
        }

        let start_time = start_time.trim();
        if start_time.len() != 5 || NaiveTime::parse_from_str(start_time, "%H:%M").is_err() {
            return Err(DomainError::Validation(format!(
                "Invalid start time '{}', expected HH:MM",
                start_time
            )));
        }

        if duration_minutes == 0 || duration_minutes > Self::MAX_DURATION_MINUTES {
            return Err(DomainError::Validation(format!(
                "Session duration must be between 1 and {} minutes",
                Self::MAX_DURATION_MINUTES
            )));
        }

        let mut days = days;
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();

        Ok(Self {
            days,
            start_time: start_time.to_string(),
            duration_minutes,
        })
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn is_scheduled_on(&self, date: CompletionDate) -> bool {
        self.days.contains(&date.weekday())
    }

    /// Dates in `[from, to]` that have a session, ascending.
    pub fn sessions_between(
        &self,
        from: CompletionDate,
        to: CompletionDate,
    ) -> Result<Vec<CompletionDate>, DomainError> {
        if from > to {
            return Err(DomainError::Validation(format!(
                "Range start {} is after end {}",
                from, to
            )));
        }
        if to.days_since(from) >= Self::MAX_RANGE_DAYS {
            return Err(DomainError::Validation(format!(
                "Range cannot exceed {} days",
                Self::MAX_RANGE_DAYS
            )));
        }

        let mut dates = Vec::new();
        let mut cursor = from;
        while cursor <= to {
            if self.is_scheduled_on(cursor) {
                dates.push(cursor);
            }
            cursor = cursor.add_days(1);
        }
        Ok(dates)
    }
}
