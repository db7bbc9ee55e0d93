//! Aggregate statistics over the run history.

use serde::Serialize;

use crate::backend::{HistoryEntry, RunStatus};

/// Counts and mean duration derived from a history collection.
///
/// Never stored; recomputed from the current history whenever needed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// Mean `time_taken` in seconds, 0 for an empty history.
    pub avg_time: f64,
}

impl DerivedStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let total = entries.len();
        let success = entries.iter().filter(|e| e.status == RunStatus::Success).count();
        let failed = entries.iter().filter(|e| e.status == RunStatus::Failed).count();
        let avg_time = if total > 0 {
            entries.iter().map(|e| e.time_taken).sum::<f64>() / total as f64
        } else {
            0.0
        };

        Self {
            total,
            success,
            failed,
            avg_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: RunStatus, time_taken: f64) -> HistoryEntry {
        HistoryEntry {
            timestamp: "2025-11-02T10:00:00".to_string(),
            email: "a@example.com".to_string(),
            initial_url: "https://example.com/q".to_string(),
            final_url: None,
            status,
            time_taken,
            quiz_count: None,
            error: None,
        }
    }

    #[test]
    fn test_empty_history() {
        let stats = DerivedStats::from_entries(&[]);
        assert_eq!(stats, DerivedStats::default());
        assert_eq!(stats.avg_time, 0.0);
    }

    #[test]
    fn test_counts_and_mean() {
        let entries = vec![
            entry(RunStatus::Success, 10.0),
            entry(RunStatus::Failed, 2.0),
            entry(RunStatus::Success, 3.0),
        ];
        let stats = DerivedStats::from_entries(&entries);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.success, 2);
        assert_eq!(stats.failed, 1);
        assert!((stats.avg_time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrecognised_status_only_counts_toward_total() {
        let entries = vec![
            entry(RunStatus::Other, 1.0),
            entry(RunStatus::Success, 1.0),
        ];
        let stats = DerivedStats::from_entries(&entries);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.failed, 0);
        assert!(stats.success + stats.failed <= stats.total);
    }
}
