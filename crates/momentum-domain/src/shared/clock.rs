use crate::completion::CompletionDate;

/// Source of "today" for toggle and analytics paths.
///
/// The core never reads wall-clock time itself; callers resolve the date
/// through a `Clock` so handlers can be tested against a fixed day.
pub trait Clock: Send + Sync {
    fn today(&self) -> CompletionDate;
}

/// Clock pinned to a single date.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: CompletionDate,
}

impl FixedClock {
    pub fn new(today: CompletionDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CompletionDate {
        self.today
    }
}
