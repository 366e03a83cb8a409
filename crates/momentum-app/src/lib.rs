//! Momentum: habits, projects and streaks over an HTTP API.

pub mod application;
pub mod presentation;
