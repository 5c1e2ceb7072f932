use crate::client::{ApiPayload, FetchError, ShowClient};
use crate::types::ScanOutcome;

/// Placeholder when a well-formed payload carries no project name.
pub const UNKNOWN_NAME: &str = "unknown";

/// Anything that can resolve one project ID to a scan outcome.
///
/// `inspect` never fails; every failure mode is folded into the outcome.
#[allow(async_fn_in_trait)]
pub trait Inspector {
    async fn inspect(&self, id: u64) -> ScanOutcome;
}

/// Inspector backed by the live lookup endpoint.
pub struct ProjectInspector {
    client: ShowClient,
}

impl ProjectInspector {
    pub fn new(client: ShowClient) -> Self {
        Self { client }
    }
}

impl Inspector for ProjectInspector {
    async fn inspect(&self, id: u64) -> ScanOutcome {
        outcome_from_fetch(id, self.client.fetch(id).await)
    }
}

/// Classify one fetch result into an outcome.
///
/// Transport, HTTP-status and decode failures become `error` outcomes carrying
/// the fetch error's own text, so "no response" stays distinguishable from a
/// server-reported application error. A payload with non-zero `code` becomes
/// an `error` outcome carrying the server-supplied message. Otherwise `hide`
/// is taken as-is (absent stays absent) and `name` falls back to a placeholder.
pub fn outcome_from_fetch(id: u64, fetched: Result<ApiPayload, FetchError>) -> ScanOutcome {
    let payload = match fetched {
        Ok(p) => p,
        Err(e) => return ScanOutcome::error(id, e.to_string()),
    };
    if payload.code != 0 {
        let message = payload
            .message
            .unwrap_or_else(|| format!("server error code {}", payload.code));
        return ScanOutcome::error(id, message);
    }
    let Some(data) = payload.data else {
        return ScanOutcome::error(id, "project data missing from response");
    };
    let name = data.name.unwrap_or_else(|| UNKNOWN_NAME.to_string());
    ScanOutcome::success(id, data.hide, name)
}
