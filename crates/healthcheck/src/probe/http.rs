use std::error::Error as StdError;
use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::redirect;
use thiserror::Error;
use tracing::{debug, info};

use super::types::{ProbeOutcome, ProbeReport};

/// Deadline applied to each probe when none is configured
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(10_000);

const DEFAULT_USER_AGENT: &str = concat!("healthcheck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ProbeBuildError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Probe timeout must be greater than zero")]
    ZeroTimeout,
}

/// Settings shared by every probe of a pass
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self { timeout: DEFAULT_PROBE_TIMEOUT, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// Prober trait, the seam between the orchestrator and the network
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Probe one endpoint and classify the result. Never fails: every
    /// problem is folded into the returned outcome.
    async fn probe(&self, endpoint: &str) -> ProbeReport;
}

/// HTTP GET prober
///
/// Holds one pooled client for all endpoints; the deadline is set per
/// request so each probe is cancelled independently.
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, ProbeBuildError> {
        if settings.timeout.is_zero() {
            return Err(ProbeBuildError::ZeroTimeout);
        }

        // 3xx must be reported as-is, not followed
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, timeout: settings.timeout })
    }
}

#[async_trait::async_trait]
impl Prober for HttpProber {
    async fn probe(&self, endpoint: &str) -> ProbeReport {
        let started_at = Utc::now();

        if endpoint.trim().is_empty() {
            return ProbeReport::new(
                endpoint,
                started_at,
                ProbeOutcome::transport("endpoint URL is empty", 0),
            );
        }

        info!(endpoint, "Probing endpoint");
        let start = Instant::now();

        let result = self.client.get(endpoint).timeout(self.timeout).send().await;

        let elapsed_ms = start.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(response) => {
                let status_code = response.status().as_u16();
                let outcome = ProbeOutcome::from_status(status_code, elapsed_ms);
                if outcome.is_success() {
                    info!(endpoint, status_code, elapsed_ms, "Endpoint is healthy");
                }
                outcome
            }
            Err(e) => {
                let error = describe_error(&e, self.timeout);
                debug!(endpoint, elapsed_ms, %error, "Probe got no response");
                ProbeOutcome::transport(error, elapsed_ms)
            }
        };

        ProbeReport::new(endpoint, started_at, outcome)
    }
}

/// Render a reqwest error with its source chain, which is where the useful
/// part (refused, dns, tls) usually lives.
fn describe_error(error: &reqwest::Error, timeout: Duration) -> String {
    if error.is_timeout() {
        return format!("request timed out after {} ms", timeout.as_millis());
    }

    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}
