use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use momentum_domain::completion::{CompletionDate, CompletionLog, TrackableEntity};
use momentum_domain::habit::Habit;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub completed: bool,
    pub streak: u32,
    pub completion_history: CompletionLog,
    /// Yesterday was completed and today is still open.
    pub at_risk: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HabitDto {
    pub fn from_habit(habit: &Habit, today: CompletionDate) -> Self {
        Self {
            id: habit.id().to_string(),
            name: habit.name().to_string(),
            description: habit.description().map(str::to_string),
            completed: habit.is_completed(),
            streak: habit.streak(),
            completion_history: habit.tracking().completion_history.clone(),
            at_risk: habit.is_at_risk(today),
            created_at: habit.created_at(),
            updated_at: habit.updated_at(),
        }
    }
}

/// Outcome of a bulk start-of-day reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResultDto {
    pub reset_count: usize,
}
