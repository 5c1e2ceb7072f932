use serde::{Deserialize, Serialize};
use std::time::Duration;
use ::time::OffsetDateTime;

/// Terminal state of one scan attempt.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// One per-ID scan result entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub id: u64,
    pub hide: Option<i64>,
    pub name: Option<String>,
    pub status: OutcomeStatus,
    pub error: Option<String>,
}

impl ScanOutcome {
    pub fn success(id: u64, hide: Option<i64>, name: String) -> Self {
        Self {
            id,
            hide,
            name: Some(name),
            status: OutcomeStatus::Success,
            error: None,
        }
    }

    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            hide: None,
            name: None,
            status: OutcomeStatus::Error,
            error: Some(message.into()),
        }
    }

    /// A project counts as hidden only on a well-formed response with `hide == 1`.
    /// An absent hide value means unknown, not "not hidden".
    pub fn is_hidden(&self) -> bool {
        self.status == OutcomeStatus::Success && self.hide == Some(1)
    }
}

/// Aggregate state and counters for one start-to-end range scan.
#[derive(Debug, Clone)]
pub struct ScanSession {
    pub start_id: u64,
    pub end_id: u64,
    pub interval: Duration,
    pub outcomes: Vec<ScanOutcome>,
    pub hidden: Vec<ScanOutcome>,
    pub error_count: u64,
    pub started_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
    pub interrupted: bool,
}

impl ScanSession {
    pub fn new(start_id: u64, end_id: u64, interval: Duration) -> Self {
        Self {
            start_id,
            end_id,
            interval,
            outcomes: Vec::new(),
            hidden: Vec::new(),
            error_count: 0,
            started_at: OffsetDateTime::now_utc(),
            finished_at: None,
            interrupted: false,
        }
    }

    /// Append one outcome. Outcomes arrive in strictly ascending ID order,
    /// one per ID starting at `start_id`.
    pub fn record(&mut self, outcome: ScanOutcome) {
        debug_assert_eq!(outcome.id, self.start_id + self.outcomes.len() as u64);
        if outcome.status == OutcomeStatus::Error {
            self.error_count += 1;
        }
        if outcome.is_hidden() {
            self.hidden.push(outcome.clone());
        }
        self.outcomes.push(outcome);
    }

    /// Close the session's time window once the range is exhausted or aborted.
    pub fn finish(&mut self) {
        self.finished_at = Some(OffsetDateTime::now_utc());
    }

    pub fn total_scanned(&self) -> u64 {
        self.outcomes.len() as u64
    }

    pub fn success_count(&self) -> u64 {
        self.total_scanned() - self.error_count
    }

    pub fn hidden_count(&self) -> u64 {
        self.hidden.len() as u64
    }

    /// Wall-clock scan duration; measured up to now while still unfinished.
    pub fn elapsed(&self) -> ::time::Duration {
        self.finished_at.unwrap_or_else(OffsetDateTime::now_utc) - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_hide_is_not_hidden() {
        let outcome = ScanOutcome::success(1, None, "unknown".to_string());
        assert!(!outcome.is_hidden());
    }

    #[test]
    fn hide_zero_is_not_hidden() {
        let outcome = ScanOutcome::success(1, Some(0), "a".to_string());
        assert!(!outcome.is_hidden());
    }

    #[test]
    fn error_outcome_is_never_hidden() {
        let outcome = ScanOutcome {
            id: 1,
            hide: Some(1),
            name: None,
            status: OutcomeStatus::Error,
            error: Some("timed out".to_string()),
        };
        assert!(!outcome.is_hidden());
    }

    #[test]
    fn record_tracks_errors_and_hidden_matches() {
        let mut session = ScanSession::new(10, 12, Duration::from_millis(500));
        session.record(ScanOutcome::success(10, Some(1), "a".to_string()));
        session.record(ScanOutcome::error(11, "no response"));
        session.record(ScanOutcome::success(12, Some(0), "b".to_string()));
        session.finish();

        assert_eq!(session.total_scanned(), 3);
        assert_eq!(session.error_count, 1);
        assert_eq!(session.success_count(), 2);
        assert_eq!(session.hidden_count(), 1);
        assert_eq!(session.hidden[0].id, 10);
    }
}
