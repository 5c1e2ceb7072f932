use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::inspector::{Inspector, UNKNOWN_NAME};
use crate::report;
use crate::types::{OutcomeStatus, ScanOutcome, ScanSession};

/// Default pause between successive requests.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Scan an inclusive project-ID range, strictly one request at a time.
///
/// Callers guarantee `start_id <= end_id`. After every ID except the last the
/// loop sleeps for `interval`; requests never overlap, because unthrottled or
/// concurrent polling trips the remote service's abuse defenses. The
/// `CancellationToken` aborts the scan between or during requests; outcomes
/// collected up to that point stay in the returned session, which is marked
/// interrupted.
pub async fn scan_range<I: Inspector>(
    inspector: &I,
    start_id: u64,
    end_id: u64,
    interval: Duration,
    cancel: CancellationToken,
) -> ScanSession {
    debug_assert!(start_id <= end_id);
    let mut session = ScanSession::new(start_id, end_id, interval);
    let total = end_id - start_id + 1;

    println!("Scanning project IDs {start_id}-{end_id}");
    println!("Request interval: {}ms", interval.as_millis());
    println!("{}", "-".repeat(60));

    for id in start_id..=end_id {
        if cancel.is_cancelled() {
            session.interrupted = true;
            break;
        }

        let outcome = tokio::select! {
            outcome = inspector.inspect(id) => outcome,
            _ = cancel.cancelled() => {
                session.interrupted = true;
                break;
            }
        };

        let scanned = id - start_id + 1;
        let progress = scanned as f64 / total as f64 * 100.0;
        println!("[{progress:>5.1}%] id {id}  {}", describe(&outcome));
        session.record(outcome);

        // No pause after the final ID.
        if id < end_id {
            tokio::select! {
                _ = time::sleep(interval) => {}
                _ = cancel.cancelled() => {
                    session.interrupted = true;
                    break;
                }
            }
        }
    }

    session.finish();
    println!("{}", report::render_summary(&session));
    session
}

fn describe(outcome: &ScanOutcome) -> String {
    match outcome.status {
        OutcomeStatus::Error => format!(
            "error: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
        OutcomeStatus::Success => match outcome.hide {
            Some(1) => format!(
                "hidden project found: {}",
                outcome.name.as_deref().unwrap_or(UNKNOWN_NAME)
            ),
            Some(hide) => format!("hide={hide}"),
            None => "hide=absent".to_string(),
        },
    }
}
