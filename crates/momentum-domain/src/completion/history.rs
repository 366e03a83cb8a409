use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::date::CompletionDate;
use crate::shared::DomainError;

/// One day's completion entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub date: CompletionDate,
    pub completed: bool,
    /// Only work-session completions carry notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CompletionRecord {
    pub fn new(date: CompletionDate, completed: bool) -> Self {
        Self {
            date,
            completed,
            notes: None,
        }
    }

    pub fn with_notes(date: CompletionDate, completed: bool, notes: Option<String>) -> Self {
        Self {
            date,
            completed,
            notes,
        }
    }
}

/// Per-entity completion history, most recent record first by convention.
///
/// Holds at most one record per date. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CompletionRecord>", into = "Vec<CompletionRecord>")]
pub struct CompletionLog {
    records: Vec<CompletionRecord>,
}

impl CompletionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from raw records. A repeated date keeps its first occurrence.
    pub fn from_records(records: Vec<CompletionRecord>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let records = records
            .into_iter()
            .filter(|record| seen.insert(record.date))
            .collect();
        Self { records }
    }

    /// Decode a stored history, normalizing anything that is not an array of
    /// records to an empty log. Elements that are not record-shaped are dropped.
    pub fn from_json_lenient(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };

        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("[completion] history is not valid JSON, treating as empty: {}", e);
                return Self::new();
            }
        };

        let serde_json::Value::Array(items) = value else {
            warn!("[completion] history is not an array, treating as empty");
            return Self::new();
        };

        let total = items.len();
        let records: Vec<CompletionRecord> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();

        if records.len() != total {
            warn!(
                "[completion] dropped {} malformed history entries",
                total - records.len()
            );
        }

        Self::from_records(records)
    }

    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(&self.records)
            .map_err(|e| DomainError::Serialization(format!("Completion history: {}", e)))
    }

    pub fn records(&self) -> &[CompletionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompletionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_date(&self, date: CompletionDate) -> Option<&CompletionRecord> {
        self.records.iter().find(|record| record.date == date)
    }

    /// Whether `date` has a record marked completed.
    pub fn is_completed_on(&self, date: CompletionDate) -> bool {
        self.find_by_date(date).is_some_and(|record| record.completed)
    }

    /// Upsert `completed` for `date`, returning the new log.
    ///
    /// An existing record keeps its position and notes; a new record goes to
    /// the front.
    pub fn recorded(&self, date: CompletionDate, completed: bool) -> Self {
        let mut records = self.records.clone();
        match records.iter_mut().find(|record| record.date == date) {
            Some(record) => record.completed = completed,
            None => records.insert(0, CompletionRecord::new(date, completed)),
        }
        Self { records }
    }

    /// Upsert used for work sessions: same placement rules as [`recorded`],
    /// and `notes` replaces whatever the record held before.
    ///
    /// [`recorded`]: CompletionLog::recorded
    pub fn recorded_with_notes(
        &self,
        date: CompletionDate,
        completed: bool,
        notes: Option<String>,
    ) -> Self {
        let mut records = self.records.clone();
        match records.iter_mut().find(|record| record.date == date) {
            Some(record) => {
                record.completed = completed;
                record.notes = notes;
            }
            None => records.insert(0, CompletionRecord::with_notes(date, completed, notes)),
        }
        Self { records }
    }

    /// Working copy ordered newest first.
    pub fn sorted_desc(&self) -> Vec<&CompletionRecord> {
        let mut sorted: Vec<&CompletionRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

impl From<Vec<CompletionRecord>> for CompletionLog {
    fn from(records: Vec<CompletionRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<CompletionLog> for Vec<CompletionRecord> {
    fn from(log: CompletionLog) -> Self {
        log.records
    }
}

/// Upsert a day's value into `log`. See [`CompletionLog::recorded`].
pub fn record_completion(
    log: &CompletionLog,
    date: CompletionDate,
    completed: bool,
) -> CompletionLog {
    log.recorded(date, completed)
}

/// Linear lookup of the record for `date`.
pub fn find_by_date(log: &CompletionLog, date: CompletionDate) -> Option<&CompletionRecord> {
    log.find_by_date(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CompletionDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_record_inserts_new_dates_at_front() {
        let log = CompletionLog::new()
            .recorded(day("2024-06-01"), true)
            .recorded(day("2024-06-02"), false);

        let dates: Vec<String> = log.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-06-02", "2024-06-01"]);
    }

    #[test]
    fn test_record_updates_in_place() {
        let log = CompletionLog::new()
            .recorded(day("2024-06-01"), true)
            .recorded(day("2024-06-02"), true)
            .recorded(day("2024-06-03"), true);

        let updated = record_completion(&log, day("2024-06-02"), false);

        assert_eq!(updated.len(), 3);
        let dates: Vec<String> = updated.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-06-03", "2024-06-02", "2024-06-01"]);
        assert!(!updated.find_by_date(day("2024-06-02")).unwrap().completed);
        // the input log is untouched
        assert!(log.find_by_date(day("2024-06-02")).unwrap().completed);
    }

    #[test]
    fn test_re_recording_is_idempotent() {
        let log = CompletionLog::new().recorded(day("2024-01-01"), false);
        let once = log.recorded(day("2024-06-01"), true);
        let twice = once.recorded(day("2024-06-01"), true);

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 2);
        let matching: Vec<_> = twice
            .iter()
            .filter(|r| r.date == day("2024-06-01"))
            .collect();
        assert_eq!(matching.len(), 1);
        assert!(matching[0].completed);
    }

    #[test]
    fn test_any_sequence_keeps_dates_unique() {
        let dates = ["2024-03-01", "2024-03-02", "2024-03-01", "2024-02-28", "2024-03-02"];
        let mut log = CompletionLog::new();
        for (i, d) in dates.iter().cycle().take(25).enumerate() {
            log = log.recorded(day(d), i % 3 != 0);
        }

        let unique: HashSet<_> = log.iter().map(|r| r.date).collect();
        assert_eq!(unique.len(), log.len());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_find_by_date() {
        let log = CompletionLog::new().recorded(day("2024-06-01"), true);
        assert!(find_by_date(&log, day("2024-06-01")).is_some());
        assert!(find_by_date(&log, day("2024-06-02")).is_none());
        assert!(log.is_completed_on(day("2024-06-01")));
        assert!(!log.is_completed_on(day("2024-06-02")));
    }

    #[test]
    fn test_notes_are_replaced_on_update() {
        let log = CompletionLog::new().recorded_with_notes(
            day("2024-06-01"),
            true,
            Some("wrote intro".to_string()),
        );
        let updated = log.recorded_with_notes(day("2024-06-01"), false, None);

        assert_eq!(updated.len(), 1);
        let record = updated.find_by_date(day("2024-06-01")).unwrap();
        assert!(!record.completed);
        assert!(record.notes.is_none());
    }

    #[test]
    fn test_plain_record_keeps_existing_notes() {
        let log = CompletionLog::new().recorded_with_notes(
            day("2024-06-01"),
            false,
            Some("blocked".to_string()),
        );
        let updated = log.recorded(day("2024-06-01"), true);
        assert_eq!(
            updated.find_by_date(day("2024-06-01")).unwrap().notes.as_deref(),
            Some("blocked")
        );
    }

    #[test]
    fn test_json_shape() {
        let log = CompletionLog::new()
            .recorded(day("2024-06-01"), true)
            .recorded_with_notes(day("2024-06-02"), false, Some("sick".to_string()));

        let json = log.to_json().unwrap();
        assert_eq!(
            json,
            r#"[{"date":"2024-06-02","completed":false,"notes":"sick"},{"date":"2024-06-01","completed":true}]"#
        );

        let back: CompletionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn test_lenient_decode_normalizes_bad_input() {
        assert!(CompletionLog::from_json_lenient(None).is_empty());
        assert!(CompletionLog::from_json_lenient(Some("null")).is_empty());
        assert!(CompletionLog::from_json_lenient(Some("{\"date\":\"2024-01-01\"}")).is_empty());
        assert!(CompletionLog::from_json_lenient(Some("not json")).is_empty());

        let log = CompletionLog::from_json_lenient(Some(
            r#"[{"date":"2024-01-02","completed":true},{"oops":1},{"date":"2024-01-02","completed":false},{"date":"2024-01-01","completed":false}]"#,
        ));
        assert_eq!(log.len(), 2);
        assert!(log.is_completed_on(day("2024-01-02")));
    }
}
