mod daily_reset_service;
mod reset_scheduler;

pub use daily_reset_service::{DailyResetReport, DailyResetService};
pub use reset_scheduler::DailyResetScheduler;
