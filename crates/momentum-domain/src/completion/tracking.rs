use serde::{Deserialize, Serialize};

use super::date::CompletionDate;
use super::history::{record_completion, CompletionLog};
use super::streak::compute_streak;

/// Completion state shared by habits and project goals.
///
/// `streak` always equals what [`compute_streak`] derives from
/// `completion_history` as of the last toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingState {
    pub completed: bool,
    pub streak: u32,
    pub completion_history: CompletionLog,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(completed: bool, streak: u32, completion_history: CompletionLog) -> Self {
        Self {
            completed,
            streak,
            completion_history,
        }
    }

    /// Flip today's value, upsert it into the history and refresh the streak.
    /// A transition to not-completed zeroes the streak without recomputing.
    pub fn toggled(&self, today: CompletionDate) -> Self {
        let completed = !self.completed;
        let completion_history = record_completion(&self.completion_history, today, completed);
        let streak = if completed {
            compute_streak(&completion_history, today)
        } else {
            0
        };

        Self {
            completed,
            streak,
            completion_history,
        }
    }

    /// Start-of-day reset: clears `completed` only.
    pub fn reset(&self) -> Self {
        Self {
            completed: false,
            streak: self.streak,
            completion_history: self.completion_history.clone(),
        }
    }
}

/// An entity owning a [`TrackingState`]: a habit or a project's minimum viable goal.
pub trait TrackableEntity: Sized {
    fn tracking(&self) -> &TrackingState;

    fn with_tracking(self, tracking: TrackingState) -> Self;
}

/// Toggle today's completion of `entity`.
pub fn toggle<E: TrackableEntity>(entity: E, today: CompletionDate) -> E {
    let tracking = entity.tracking().toggled(today);
    entity.with_tracking(tracking)
}

/// Bulk start-of-day reset. Only `completed` changes; streaks and histories are
/// carried over unchanged, unlike a toggle to not-completed.
pub fn reset_daily<E: TrackableEntity>(entities: Vec<E>) -> Vec<E> {
    entities
        .into_iter()
        .map(|entity| {
            let tracking = entity.tracking().reset();
            entity.with_tracking(tracking)
        })
        .collect()
}

impl TrackableEntity for TrackingState {
    fn tracking(&self) -> &TrackingState {
        self
    }

    fn with_tracking(self, tracking: TrackingState) -> Self {
        tracking
    }
}
