use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Calendar day a completion is recorded against, always `YYYY-MM-DD` on the wire.
///
/// Ordering is chronological, which matches the lexicographic order of the
/// string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompletionDate(NaiveDate);

impl CompletionDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                DomainError::Validation(format!("Invalid date {:04}-{:02}-{:02}", year, month, day))
            })
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        value.parse()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// The day before this one.
    pub fn previous(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    pub fn days_since(&self, earlier: CompletionDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl From<NaiveDate> for CompletionDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CompletionDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields, the stored form must stay fixed-width
        if s.len() != 10 {
            return Err(DomainError::Validation(format!(
                "Invalid date '{}', expected YYYY-MM-DD",
                s
            )));
        }
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| {
                DomainError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
            })
    }
}

impl fmt::Display for CompletionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for CompletionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CompletionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
