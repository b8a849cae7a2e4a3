use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classified result of one probe.
///
/// `elapsed_ms` is measured for every kind, including transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// A response arrived with a 2xx status
    Success { status_code: u16, elapsed_ms: u64 },

    /// A response arrived with any other status
    HttpFailure { status_code: u16, elapsed_ms: u64 },

    /// No response: timeout, DNS failure, refused connection, bad URL
    TransportFailure { error: String, elapsed_ms: u64 },
}

impl ProbeOutcome {
    /// Classify a received status code.
    pub fn from_status(status_code: u16, elapsed_ms: u64) -> Self {
        if (200..300).contains(&status_code) {
            Self::Success { status_code, elapsed_ms }
        } else {
            Self::HttpFailure { status_code, elapsed_ms }
        }
    }

    pub fn transport(error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self::TransportFailure { error: error.into(), elapsed_ms }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self {
            Self::Success { elapsed_ms, .. }
            | Self::HttpFailure { elapsed_ms, .. }
            | Self::TransportFailure { elapsed_ms, .. } => *elapsed_ms,
        }
    }

    /// Status code of the response, if one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Success { status_code, .. } | Self::HttpFailure { status_code, .. } => {
                Some(*status_code)
            }
            Self::TransportFailure { .. } => None,
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeOutcome::Success { status_code, elapsed_ms } => {
                write!(f, "up ({status_code}, {elapsed_ms} ms)")
            }
            ProbeOutcome::HttpFailure { status_code, elapsed_ms } => {
                write!(f, "http failure ({status_code}, {elapsed_ms} ms)")
            }
            ProbeOutcome::TransportFailure { error, elapsed_ms } => {
                write!(f, "transport failure ({error}, {elapsed_ms} ms)")
            }
        }
    }
}

/// Outcome of a probe together with what was probed and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// URL that was probed
    pub endpoint: String,

    /// Wall-clock time at which the probe started
    pub started_at: DateTime<Utc>,

    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    pub fn new(endpoint: impl Into<String>, started_at: DateTime<Utc>, outcome: ProbeOutcome) -> Self {
        Self { endpoint: endpoint.into(), started_at, outcome }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(ProbeOutcome::from_status(200, 5).is_success());
        assert!(ProbeOutcome::from_status(204, 5).is_success());
        assert!(ProbeOutcome::from_status(299, 5).is_success());

        // Anything outside 2xx is a failure, redirects included
        assert_eq!(
            ProbeOutcome::from_status(301, 5),
            ProbeOutcome::HttpFailure { status_code: 301, elapsed_ms: 5 }
        );
        assert!(!ProbeOutcome::from_status(101, 5).is_success());
        assert!(!ProbeOutcome::from_status(418, 5).is_success());
        assert!(!ProbeOutcome::from_status(503, 5).is_success());
    }

    #[test]
    fn test_accessors() {
        let outcome = ProbeOutcome::transport("connection refused", 12);
        assert_eq!(outcome.elapsed_ms(), 12);
        assert_eq!(outcome.status_code(), None);

        let outcome = ProbeOutcome::from_status(500, 40);
        assert_eq!(outcome.elapsed_ms(), 40);
        assert_eq!(outcome.status_code(), Some(500));
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let outcome = ProbeOutcome::from_status(418, 30);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["kind"], "http_failure");
        assert_eq!(json["status_code"], 418);
        assert_eq!(json["elapsed_ms"], 30);
    }
}
