use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ::time::{format_description::well_known, macros::format_description, OffsetDateTime};

use crate::inspector::UNKNOWN_NAME;
use crate::types::{ScanOutcome, ScanSession};

/// On-disk shape of one saved session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionDocument {
    pub scan_time: String,
    pub total_scanned: u64,
    pub hidden_count: u64,
    pub hidden_projects: Vec<ScanOutcome>,
    pub all_results: Vec<ScanOutcome>,
}

impl SessionDocument {
    pub fn from_session(session: &ScanSession) -> Self {
        Self {
            scan_time: now_rfc3339(),
            total_scanned: session.total_scanned(),
            hidden_count: session.hidden_count(),
            hidden_projects: session.hidden.clone(),
            all_results: session.outcomes.clone(),
        }
    }
}

/// Write the session as pretty JSON and return the path actually written.
///
/// With no explicit target a timestamped filename is synthesized, so an
/// earlier session's file is never clobbered.
pub fn persist(session: &ScanSession, target: Option<&Path>) -> Result<PathBuf> {
    let path = match target {
        Some(p) => p.to_path_buf(),
        None => default_output_path(),
    };
    let doc = SessionDocument::from_session(session);
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &doc)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// `scan_results_YYYYMMDD_HHMMSS.json` in the working directory.
pub fn default_output_path() -> PathBuf {
    let stamp_format = format_description!("[year][month][day]_[hour][minute][second]");
    let stamp = OffsetDateTime::now_utc()
        .format(&stamp_format)
        .unwrap_or_else(|_| String::from("00000000_000000"));
    PathBuf::from(format!("scan_results_{stamp}.json"))
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// Human-readable end-of-scan summary, hidden matches listed last.
pub fn render_summary(session: &ScanSession) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "-".repeat(60));
    if session.interrupted {
        let _ = writeln!(out, "Scan interrupted!");
    } else {
        let _ = writeln!(out, "Scan complete!");
    }
    let _ = writeln!(out, "Elapsed: {:.1}s", session.elapsed().as_seconds_f64());
    let _ = writeln!(out, "Total scanned: {}", session.total_scanned());
    let _ = writeln!(out, "Successful: {}", session.success_count());
    let _ = writeln!(out, "Errors: {}", session.error_count);
    let _ = write!(out, "Hidden projects found: {}", session.hidden_count());
    if !session.hidden.is_empty() {
        let _ = write!(out, "\n\nHidden projects:");
        for project in &session.hidden {
            let _ = write!(
                out,
                "\n  ID: {} - {}",
                project.id,
                project.name.as_deref().unwrap_or(UNKNOWN_NAME)
            );
        }
    }
    out
}
