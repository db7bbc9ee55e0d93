//! The run history currently on display.

use std::time::Instant;

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::backend::HistoryEntry;

/// Holds the most recently committed history and guards against stale
/// responses.
///
/// Every history fetch carries a token taken when the request was issued.
/// A response is committed only if its token is newer than the one already
/// on display, so a slow early request can never overwrite a later one.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    committed_token: u64,
    /// When the history was last replaced.
    pub last_updated: Option<Instant>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the history with `entries` if `token` is newer than the
    /// current one.
    ///
    /// Returns `true` if the entries were committed.
    pub fn commit(&mut self, token: u64, entries: Vec<HistoryEntry>) -> bool {
        if token <= self.committed_token {
            return false;
        }
        self.committed_token = token;
        self.entries = entries;
        self.last_updated = Some(Instant::now());
        true
    }

    /// Entries in the order the backend returned them.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token of the response currently on display.
    pub fn committed_token(&self) -> u64 {
        self.committed_token
    }
}

/// Render a backend timestamp in local time.
///
/// The backend emits naive UTC ISO-8601 timestamps; RFC 3339 timestamps with
/// an offset are accepted too. Anything unparseable is shown verbatim.
pub fn local_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

/// "1 quiz" / "3 quizzes", or `None` when the count is absent or zero.
pub fn quiz_count_label(count: Option<u32>) -> Option<String> {
    match count {
        None | Some(0) => None,
        Some(1) => Some("1 quiz".to_string()),
        Some(n) => Some(format!("{} quizzes", n)),
    }
}

/// Convert a backend timestamp to UTC, if it parses.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|n| n.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RunStatus;
    use chrono::TimeZone;

    fn entry(email: &str) -> HistoryEntry {
        HistoryEntry {
            timestamp: "2025-11-02T10:00:00.123456".to_string(),
            email: email.to_string(),
            initial_url: "https://example.com/q".to_string(),
            final_url: None,
            status: RunStatus::Success,
            time_taken: 1.0,
            quiz_count: Some(2),
            error: None,
        }
    }

    #[test]
    fn test_commit_newer_token() {
        let mut history = History::new();
        assert!(history.commit(1, vec![entry("a@example.com")]));
        assert!(history.commit(2, vec![entry("b@example.com"), entry("c@example.com")]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.committed_token(), 2);
        assert!(history.last_updated.is_some());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut history = History::new();
        assert!(history.commit(5, vec![entry("new@example.com")]));

        // A request issued earlier resolves later.
        assert!(!history.commit(3, vec![]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].email, "new@example.com");
    }

    #[test]
    fn test_commit_replaces_wholesale() {
        let mut history = History::new();
        history.commit(1, vec![entry("a@example.com"), entry("b@example.com")]);
        history.commit(2, vec![entry("c@example.com")]);
        let emails: Vec<&str> = history.entries().iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, vec!["c@example.com"]);
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2025, 11, 2, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-11-02T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-11-02T12:00:00+02:00"), Some(expected));
        assert!(parse_timestamp("2025-11-02T10:00:00.5").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_local_timestamp_fallback() {
        assert_eq!(local_timestamp("yesterday"), "yesterday");
        assert_eq!(local_timestamp("2025-11-02T10:00:00").len(), "2025-11-02 10:00:00".len());
    }

    #[test]
    fn test_quiz_count_label() {
        assert_eq!(quiz_count_label(None), None);
        assert_eq!(quiz_count_label(Some(0)), None);
        assert_eq!(quiz_count_label(Some(1)).as_deref(), Some("1 quiz"));
        assert_eq!(quiz_count_label(Some(4)).as_deref(), Some("4 quizzes"));
    }
}
