use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::completion::{CompletionDate, TrackableEntity, TrackingState};
use crate::shared::{DomainError, HabitId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    id: HabitId,
    user_id: UserId,
    name: String,
    description: Option<String>,
    tracking: TrackingState,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Habit {
    pub const MAX_NAME_LEN: usize = 100;

    pub fn new(
        user_id: UserId,
        name: String,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = Self::validate_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id: HabitId::new(),
            user_id,
            name,
            description: normalize_description(description),
            tracking: TrackingState::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(
        id: HabitId,
        user_id: UserId,
        name: String,
        description: Option<String>,
        tracking: TrackingState,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            description,
            tracking,
            created_at,
            updated_at,
        }
    }

    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "Habit name cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > Self::MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "Habit name cannot exceed {} characters",
                Self::MAX_NAME_LEN
            )));
        }
        Ok(trimmed.to_string())
    }

    pub fn id(&self) -> &HabitId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.tracking.completed
    }

    pub fn streak(&self) -> u32 {
        self.tracking.streak
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        self.name = Self::validate_name(&name)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_description(&mut self, description: Option<String>) {
        self.description = normalize_description(description);
        self.updated_at = Utc::now();
    }

    /// Today is still open while yesterday was completed: the streak breaks
    /// if nothing is recorded before the day ends.
    pub fn is_at_risk(&self, today: CompletionDate) -> bool {
        let history = &self.tracking.completion_history;
        !history.is_completed_on(today) && history.is_completed_on(today.previous())
    }
}

impl TrackableEntity for Habit {
    fn tracking(&self) -> &TrackingState {
        &self.tracking
    }

    fn with_tracking(mut self, tracking: TrackingState) -> Self {
        self.tracking = tracking;
        self.updated_at = Utc::now();
        self
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
