//! Operator-visible activity log.

use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeZone};

/// Maximum number of lines kept in the log.
pub const MAX_LOG_LINES: usize = 100;

/// A capped, newest-first list of timestamped lines.
///
/// Lines are never removed explicitly; older lines age out once the buffer
/// holds [`MAX_LOG_LINES`].
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
}

impl LogBuffer {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `message` stamped with the current local time.
    pub fn add(&mut self, message: impl AsRef<str>) {
        self.add_at(Local::now(), message);
    }

    /// Prepend `message` stamped with `time`.
    pub fn add_at<Tz: TimeZone>(&mut self, time: DateTime<Tz>, message: impl AsRef<str>)
    where
        Tz::Offset: std::fmt::Display,
    {
        let line = format!("[{}] {}", time.format("%H:%M:%S"), message.as_ref());
        self.lines.push_front(line);
        self.lines.truncate(MAX_LOG_LINES);
    }

    /// Lines, newest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The most recent line, if any.
    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_line_format() {
        let mut log = LogBuffer::new();
        let time = Utc.with_ymd_and_hms(2025, 11, 2, 9, 5, 7).unwrap();
        log.add_at(time, "Submitting quiz: https://example.com/quiz");
        assert_eq!(log.latest(), Some("[09:05:07] Submitting quiz: https://example.com/quiz"));
    }

    #[test]
    fn test_newest_first() {
        let mut log = LogBuffer::new();
        log.add("first");
        log.add("second");
        log.add("third");

        let lines: Vec<&str> = log.lines().collect();
        assert!(lines[0].ends_with("third"));
        assert!(lines[1].ends_with("second"));
        assert!(lines[2].ends_with("first"));
    }

    #[test]
    fn test_capped_at_max() {
        let mut log = LogBuffer::new();
        for i in 0..250 {
            log.add(format!("line {}", i));
            assert!(log.len() <= MAX_LOG_LINES);
        }

        assert_eq!(log.len(), MAX_LOG_LINES);
        assert!(log.latest().unwrap().ends_with("line 249"));
        assert!(log.lines().last().unwrap().ends_with("line 150"));
    }

    #[test]
    fn test_empty() {
        let log = LogBuffer::new();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }
}
