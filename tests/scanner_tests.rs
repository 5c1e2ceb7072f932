use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use show_scan_rs::inspector::Inspector;
use show_scan_rs::scanner::scan_range;
use show_scan_rs::types::{OutcomeStatus, ScanOutcome};

/// Inspector that replays scripted outcomes and counts how often it is called.
struct ScriptedInspector {
    first_id: u64,
    outcomes: Vec<ScanOutcome>,
    calls: AtomicU64,
    cancel_at: Option<(u64, CancellationToken)>,
}

impl ScriptedInspector {
    fn new(first_id: u64, outcomes: Vec<ScanOutcome>) -> Self {
        Self {
            first_id,
            outcomes,
            calls: AtomicU64::new(0),
            cancel_at: None,
        }
    }

    fn cancelling_at(mut self, id: u64, cancel: CancellationToken) -> Self {
        self.cancel_at = Some((id, cancel));
        self
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Inspector for ScriptedInspector {
    async fn inspect(&self, id: u64) -> ScanOutcome {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some((cancel_id, cancel)) = &self.cancel_at {
            if id == *cancel_id {
                cancel.cancel();
            }
        }
        self.outcomes[(id - self.first_id) as usize].clone()
    }
}

fn success(id: u64, hide: Option<i64>, name: &str) -> ScanOutcome {
    ScanOutcome::success(id, hide, name.to_string())
}

#[tokio::test]
async fn mixed_range_classifies_and_aggregates() {
    let inspector = ScriptedInspector::new(
        100,
        vec![
            success(100, Some(1), "A"),
            ScanOutcome::error(101, "request failed: operation timed out"),
            success(102, Some(0), "B"),
        ],
    );
    let session = scan_range(
        &inspector,
        100,
        102,
        Duration::ZERO,
        CancellationToken::new(),
    )
    .await;

    let ids: Vec<u64> = session.outcomes.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![100, 101, 102]);
    assert_eq!(session.outcomes[0].status, OutcomeStatus::Success);
    assert_eq!(session.outcomes[1].status, OutcomeStatus::Error);
    assert_eq!(session.outcomes[2].status, OutcomeStatus::Success);
    assert_eq!(session.total_scanned(), 3);
    assert_eq!(session.success_count(), 2);
    assert_eq!(session.error_count, 1);
    assert_eq!(session.hidden_count(), 1);
    assert_eq!(session.hidden[0].id, 100);
    assert!(!session.interrupted);
    assert!(session.finished_at.is_some());
}

#[tokio::test]
async fn produces_one_outcome_per_id_in_ascending_order() {
    let outcomes = (1..=20).map(|id| success(id, None, "x")).collect();
    let inspector = ScriptedInspector::new(1, outcomes);
    let session = scan_range(&inspector, 1, 20, Duration::ZERO, CancellationToken::new()).await;

    assert_eq!(session.outcomes.len(), 20);
    let ids: Vec<u64> = session.outcomes.iter().map(|o| o.id).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
    assert_eq!(inspector.calls(), 20);
    // Absent hide values never classify as hidden.
    assert!(session.hidden.is_empty());
}

#[tokio::test]
async fn hidden_matches_keep_first_seen_order() {
    let inspector = ScriptedInspector::new(
        1,
        vec![
            success(1, Some(1), "first"),
            success(2, Some(0), "plain"),
            success(3, Some(1), "second"),
            ScanOutcome::error(4, "HTTP status 502 Bad Gateway"),
            success(5, None, "unknown"),
            success(6, Some(1), "third"),
        ],
    );
    let session = scan_range(&inspector, 1, 6, Duration::ZERO, CancellationToken::new()).await;

    let hidden_ids: Vec<u64> = session.hidden.iter().map(|o| o.id).collect();
    assert_eq!(hidden_ids, vec![1, 3, 6]);
    assert!(session
        .hidden
        .iter()
        .all(|o| o.status == OutcomeStatus::Success && o.hide == Some(1)));
}

#[tokio::test]
async fn single_id_range_fetches_once_without_delay() {
    let inspector = ScriptedInspector::new(5, vec![success(5, Some(0), "solo")]);
    let started = Instant::now();
    let session = scan_range(
        &inspector,
        5,
        5,
        Duration::from_secs(5),
        CancellationToken::new(),
    )
    .await;

    assert_eq!(inspector.calls(), 1);
    assert_eq!(session.total_scanned(), 1);
    // A single-ID scan never sleeps, so the 5s interval must not show up.
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn pre_cancelled_token_scans_nothing() {
    let inspector = ScriptedInspector::new(1, vec![success(1, Some(0), "x")]);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let session = scan_range(&inspector, 1, 1, Duration::ZERO, cancel).await;

    assert_eq!(inspector.calls(), 0);
    assert!(session.outcomes.is_empty());
    assert!(session.interrupted);
}

#[tokio::test]
async fn cancellation_preserves_collected_prefix() {
    let cancel = CancellationToken::new();
    let outcomes = (10..=20).map(|id| success(id, Some(0), "x")).collect();
    let inspector = ScriptedInspector::new(10, outcomes).cancelling_at(12, cancel.clone());
    let session = scan_range(&inspector, 10, 20, Duration::from_millis(10), cancel).await;

    let ids: Vec<u64> = session.outcomes.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
    assert!(session.interrupted);
    assert!(session.finished_at.is_some());
}
