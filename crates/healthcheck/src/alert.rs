//! Alert formatting for failed probes.
//!
//! Pure text rendering: the same endpoint, outcome and timestamp always
//! produce the same [`Alert`].

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::probe::{ProbeOutcome, ProbeReport};

/// A formatted failure notification, handed straight to the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub endpoint: String,
    pub subject: String,
    pub body: String,
}

impl Alert {
    /// Build the alert for a failed report.
    pub fn from_report(report: &ProbeReport) -> Self {
        format_alert(&report.endpoint, &report.outcome, report.started_at)
    }
}

/// Render the subject and body describing a failed probe.
///
/// A `Success` outcome carries neither an error nor a failing status, so
/// it falls back to the generic template; the orchestrator never asks for
/// one.
pub fn format_alert(endpoint: &str, outcome: &ProbeOutcome, observed_at: DateTime<Utc>) -> Alert {
    let time = observed_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let (subject, body) = match outcome {
        ProbeOutcome::TransportFailure { error, elapsed_ms } => (
            format!("Health check failed: Exception for {endpoint}"),
            format!(
                "Health check for {endpoint} failed with an exception.\n\
                 \n\
                 Endpoint: {endpoint}\n\
                 Time: {time}\n\
                 Elapsed: {elapsed_ms} ms\n\
                 Exception: {error}\n"
            ),
        ),
        ProbeOutcome::HttpFailure { status_code, elapsed_ms } => (
            format!("Health check failed: HTTP {status_code} from {endpoint}"),
            format!(
                "Health check for {endpoint} returned a non-success status code.\n\
                 \n\
                 Endpoint: {endpoint}\n\
                 Time: {time}\n\
                 Status code: {status_code} ({reason})\n\
                 Elapsed: {elapsed_ms} ms\n",
                reason = reason_phrase(*status_code),
            ),
        ),
        ProbeOutcome::Success { elapsed_ms, .. } => (
            format!("Health check failed for {endpoint}"),
            format!(
                "Health check for {endpoint} failed.\n\
                 \n\
                 Endpoint: {endpoint}\n\
                 Time: {time}\n\
                 Elapsed: {elapsed_ms} ms\n"
            ),
        ),
    };

    Alert { endpoint: endpoint.to_string(), subject, body }
}

/// Symbolic name of a status code, `Unknown` for unregistered codes.
fn reason_phrase(status_code: u16) -> &'static str {
    StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown")
}
