use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::completion::CompletionDate;
use crate::shared::{DomainError, PhaseId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl PhaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseStatus::Todo => "todo",
            PhaseStatus::InProgress => "in_progress",
            PhaseStatus::Done => "done",
        }
    }
}

impl FromStr for PhaseStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(PhaseStatus::Todo),
            "in_progress" => Ok(PhaseStatus::InProgress),
            "done" => Ok(PhaseStatus::Done),
            other => Err(DomainError::Validation(format!(
                "Unknown phase status: {}",
                other
            ))),
        }
    }
}

/// A kanban column entry inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    id: PhaseId,
    name: String,
    status: PhaseStatus,
    position: u32,
    due_date: Option<CompletionDate>,
}

/// Partial update applied by [`Project::update_phase`](super::Project::update_phase).
/// `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default)]
pub struct PhaseChanges {
    pub name: Option<String>,
    pub status: Option<PhaseStatus>,
    pub position: Option<u32>,
    pub due_date: Option<Option<CompletionDate>>,
}

impl Phase {
    pub(super) fn new(
        name: String,
        position: u32,
        due_date: Option<CompletionDate>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: PhaseId::new(),
            name: validate_phase_name(&name)?,
            status: PhaseStatus::Todo,
            position,
            due_date,
        })
    }

    pub fn restore(
        id: PhaseId,
        name: String,
        status: PhaseStatus,
        position: u32,
        due_date: Option<CompletionDate>,
    ) -> Self {
        Self {
            id,
            name,
            status,
            position,
            due_date,
        }
    }

    pub fn id(&self) -> &PhaseId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> PhaseStatus {
        self.status
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn due_date(&self) -> Option<CompletionDate> {
        self.due_date
    }

    pub fn is_done(&self) -> bool {
        self.status == PhaseStatus::Done
    }

    pub(super) fn apply(&mut self, changes: &PhaseChanges) -> Result<(), DomainError> {
        if let Some(name) = &changes.name {
            self.name = validate_phase_name(name)?;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        Ok(())
    }

    pub(super) fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

fn validate_phase_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "Phase name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > 100 {
        return Err(DomainError::Validation(
            "Phase name cannot exceed 100 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in [PhaseStatus::Todo, PhaseStatus::InProgress, PhaseStatus::Done] {
            assert_eq!(status.as_str().parse::<PhaseStatus>().unwrap(), status);
        }
        assert!("blocked".parse::<PhaseStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&PhaseStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_apply_changes() {
        let mut phase = Phase::new("Design".to_string(), 0, None).unwrap();
        let due = CompletionDate::parse("2024-07-01").unwrap();

        phase
            .apply(&PhaseChanges {
                status: Some(PhaseStatus::Done),
                due_date: Some(Some(due)),
                ..Default::default()
            })
            .unwrap();
        assert!(phase.is_done());
        assert_eq!(phase.due_date(), Some(due));

        phase
            .apply(&PhaseChanges {
                due_date: Some(None),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(phase.due_date(), None);
        assert_eq!(phase.name(), "Design");

        let invalid = PhaseChanges {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(phase.apply(&invalid).is_err());
    }
}
