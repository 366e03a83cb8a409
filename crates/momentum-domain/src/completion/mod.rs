//! Completion history reconciliation shared by every trackable entity.
//!
//! Everything here is a pure transformation over small in-memory values; the
//! caller supplies "today" and persists the result.

mod date;
mod history;
mod streak;
mod tracking;

#[cfg(test)]
mod tracking_test;

pub use date::CompletionDate;
pub use history::{find_by_date, record_completion, CompletionLog, CompletionRecord};
pub use streak::{
    compute_streak, compute_streak_with, longest_streak, summarize, StreakPolicy, StreakSummary,
};
pub use tracking::{reset_daily, toggle, TrackableEntity, TrackingState};
