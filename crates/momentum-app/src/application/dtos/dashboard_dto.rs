use serde::{Deserialize, Serialize};

use momentum_domain::completion::CompletionDate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtRiskHabitDto {
    pub id: String,
    pub name: String,
    pub streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgressDto {
    pub id: String,
    pub name: String,
    pub progress: f64,
    pub mvg_completed: bool,
    pub mvg_streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySessionDto {
    pub project_id: String,
    pub project_name: String,
    pub start_time: String,
    pub duration_minutes: u32,
    /// A completed session is already logged for today.
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub date: CompletionDate,
    pub habit_count: usize,
    pub completed_today: usize,
    pub at_risk: Vec<AtRiskHabitDto>,
    pub best_current_streak: u32,
    pub projects: Vec<ProjectProgressDto>,
    pub sessions_today: Vec<TodaySessionDto>,
}
