use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::phase::{Phase, PhaseChanges};
use super::schedule::WorkSchedule;
use crate::completion::{self, CompletionDate, CompletionLog, TrackableEntity, TrackingState};
use crate::shared::{DomainError, PhaseId, ProjectId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "paused" => Ok(ProjectStatus::Paused),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            other => Err(DomainError::Validation(format!(
                "Unknown project status: {}",
                other
            ))),
        }
    }
}

/// The smallest daily step that keeps a project moving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumViableGoal {
    pub description: Option<String>,
    pub tracking: TrackingState,
}

impl TrackableEntity for MinimumViableGoal {
    fn tracking(&self) -> &TrackingState {
        &self.tracking
    }

    fn with_tracking(self, tracking: TrackingState) -> Self {
        Self { tracking, ..self }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    user_id: UserId,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    phases: Vec<Phase>,
    mvg: MinimumViableGoal,
    session_log: CompletionLog,
    schedule: Option<WorkSchedule>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    pub const MAX_NAME_LEN: usize = 100;

    pub fn new(
        user_id: UserId,
        name: String,
        description: Option<String>,
        mvg_description: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = Self::validate_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id: ProjectId::new(),
            user_id,
            name,
            description: normalize_text(description),
            status: ProjectStatus::Active,
            phases: Vec::new(),
            mvg: MinimumViableGoal {
                description: normalize_text(mvg_description),
                tracking: TrackingState::new(),
            },
            session_log: CompletionLog::new(),
            schedule: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ProjectId,
        user_id: UserId,
        name: String,
        description: Option<String>,
        status: ProjectStatus,
        phases: Vec<Phase>,
        mvg: MinimumViableGoal,
        session_log: CompletionLog,
        schedule: Option<WorkSchedule>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut phases = phases;
        phases.sort_by_key(|p| p.position());

        Self {
            id,
            user_id,
            name,
            description,
            status,
            phases,
            mvg,
            session_log,
            schedule,
            created_at,
            updated_at,
        }
    }

    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "Project name cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > Self::MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "Project name cannot exceed {} characters",
                Self::MAX_NAME_LEN
            )));
        }
        Ok(trimmed.to_string())
    }

    pub fn id(&self) -> &ProjectId {
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

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Ordered by position.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn mvg(&self) -> &MinimumViableGoal {
        &self.mvg
    }

    pub fn session_log(&self) -> &CompletionLog {
        &self.session_log
    }

    pub fn schedule(&self) -> Option<&WorkSchedule> {
        self.schedule.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Share of phases marked done, in `0.0..=1.0`. A project without phases
    /// reports 0.
    pub fn progress(&self) -> f64 {
        if self.phases.is_empty() {
            return 0.0;
        }
        let done = self.phases.iter().filter(|p| p.is_done()).count();
        done as f64 / self.phases.len() as f64
    }

    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        self.name = Self::validate_name(&name)?;
        self.touch();
        Ok(())
    }

    pub fn update_description(&mut self, description: Option<String>) {
        self.description = normalize_text(description);
        self.touch();
    }

    pub fn update_mvg_description(&mut self, description: Option<String>) {
        self.mvg.description = normalize_text(description);
        self.touch();
    }

    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
        self.touch();
    }

    pub fn add_phase(
        &mut self,
        name: String,
        due_date: Option<CompletionDate>,
    ) -> Result<&Phase, DomainError> {
        let phase = Phase::new(name, self.phases.len() as u32, due_date)?;
        self.phases.push(phase);
        self.touch();
        Ok(&self.phases[self.phases.len() - 1])
    }

    /// Apply `changes` to one phase. A new position moves the phase and
    /// renumbers the others so positions stay `0..n`.
    pub fn update_phase(
        &mut self,
        phase_id: &PhaseId,
        changes: PhaseChanges,
    ) -> Result<&Phase, DomainError> {
        let index = self.phase_index(phase_id)?;
        self.phases[index].apply(&changes)?;

        let index = match changes.position {
            Some(position) => {
                let phase = self.phases.remove(index);
                let target = (position as usize).min(self.phases.len());
                self.phases.insert(target, phase);
                self.renumber_phases();
                target
            }
            None => index,
        };

        self.touch();
        Ok(&self.phases[index])
    }

    pub fn remove_phase(&mut self, phase_id: &PhaseId) -> Result<Phase, DomainError> {
        let index = self.phase_index(phase_id)?;
        let removed = self.phases.remove(index);
        self.renumber_phases();
        self.touch();
        Ok(removed)
    }

    /// Record (or overwrite) the work session for `date`.
    pub fn record_work_session(
        &mut self,
        date: CompletionDate,
        completed: bool,
        notes: Option<String>,
    ) {
        self.session_log = self
            .session_log
            .recorded_with_notes(date, completed, normalize_text(notes));
        self.touch();
    }

    pub fn set_schedule(&mut self, schedule: Option<WorkSchedule>) {
        self.schedule = schedule;
        self.touch();
    }

    pub fn toggle_mvg(mut self, today: CompletionDate) -> Self {
        self.mvg = completion::toggle(self.mvg, today);
        self.touch();
        self
    }

    /// Whether a work session falls on `date` while the project is active.
    pub fn has_session_on(&self, date: CompletionDate) -> bool {
        self.status == ProjectStatus::Active
            && self
                .schedule
                .as_ref()
                .is_some_and(|s| s.is_scheduled_on(date))
    }

    fn phase_index(&self, phase_id: &PhaseId) -> Result<usize, DomainError> {
        self.phases
            .iter()
            .position(|p| p.id() == phase_id)
            .ok_or_else(|| DomainError::PhaseNotFound(phase_id.to_string()))
    }

    fn renumber_phases(&mut self) {
        for (position, phase) in self.phases.iter_mut().enumerate() {
            phase.set_position(position as u32);
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A project is tracked through its minimum viable goal, which lets the
/// daily reset treat projects and habits alike.
impl TrackableEntity for Project {
    fn tracking(&self) -> &TrackingState {
        &self.mvg.tracking
    }

    fn with_tracking(mut self, tracking: TrackingState) -> Self {
        self.mvg.tracking = tracking;
        self.touch();
        self
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
