use chrono::Local;
use momentum_domain::completion::CompletionDate;
use momentum_domain::shared::Clock;

/// Today's date in the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CompletionDate {
        CompletionDate::new(Local::now().date_naive())
    }
}
