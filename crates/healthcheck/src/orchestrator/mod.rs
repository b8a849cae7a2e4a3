//! Orchestrator module - runs one health-check pass
//!
//! The orchestrator:
//! - Reads the endpoint list from the configuration store (fatal on failure)
//! - Spawns one task per endpoint, each probing and alerting independently
//! - Waits for every task before reporting the pass as finished


use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tracing::{Instrument, error, info, info_span, warn};

use crate::ENDPOINTS_KEY;
use crate::alert::Alert;
use crate::notifier::{DeliveryResult, NotifierGateway};
use crate::probe::Prober;
use crate::store::{ConfigStore, StoreError};

/// Table used when none is configured
pub const DEFAULT_TABLE: &str = "health-check";

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Failed to read endpoint list: {0}")]
    Store(#[from] StoreError),
}

/// Where the endpoint list lives in the configuration store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSource {
    pub table: String,
    pub key: String,
}

impl Default for EndpointSource {
    fn default() -> Self {
        Self { table: DEFAULT_TABLE.to_string(), key: ENDPOINTS_KEY.to_string() }
    }
}

/// Counts for a finished pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub endpoints: usize,
    pub healthy: usize,
    pub failing: usize,
    pub alerts_delivered: usize,
    pub alerts_undelivered: usize,
}

impl RunSummary {
    fn record(&mut self, result: &EndpointResult) {
        match &result.delivery {
            None => self.healthy += 1,
            Some(delivery) => {
                self.failing += 1;
                if delivery.ok {
                    self.alerts_delivered += 1;
                } else {
                    self.alerts_undelivered += 1;
                }
            }
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} endpoints: {} healthy, {} failing ({} alerts delivered, {} undelivered)",
            self.endpoints, self.healthy, self.failing, self.alerts_delivered, self.alerts_undelivered
        )
    }
}

/// What happened to one endpoint. `delivery` is set only when it failed.
#[derive(Debug)]
struct EndpointResult {
    delivery: Option<DeliveryResult>,
}

/// Runs health-check passes over injected collaborators
pub struct Orchestrator {
    store: Arc<dyn ConfigStore>,
    prober: Arc<dyn Prober>,
    gateway: NotifierGateway,
    source: EndpointSource,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        prober: Arc<dyn Prober>,
        gateway: NotifierGateway,
        source: EndpointSource,
    ) -> Self {
        Self { store, prober, gateway, source }
    }

    pub fn source(&self) -> &EndpointSource {
        &self.source
    }

    /// Run one pass to completion.
    ///
    /// Fails only when the endpoint list cannot be read, in which case no
    /// probe is attempted. Failing endpoints are reported through alerts
    /// and the returned summary, never as an error.
    pub async fn run(&self) -> Result<RunSummary, OrchestratorError> {
        let endpoints = match self.store.get(&self.source.table, &self.source.key).await {
            Ok(endpoints) => endpoints,
            Err(e) => {
                error!(
                    table = %self.source.table,
                    key = %self.source.key,
                    error = %e,
                    "Failed to read endpoint list"
                );
                return Err(e.into());
            }
        };

        if endpoints.is_empty() {
            warn!(table = %self.source.table, key = %self.source.key, "Endpoint list is empty");
        }
        info!(count = endpoints.len(), "Starting health-check pass");

        let handles: Vec<_> = endpoints
            .iter()
            .map(|endpoint| {
                let prober = self.prober.clone();
                let gateway = self.gateway.clone();
                let endpoint = endpoint.clone();
                let span = info_span!("endpoint", endpoint = %endpoint);

                tokio::spawn(
                    async move { check_endpoint(prober.as_ref(), &gateway, &endpoint).await }
                        .instrument(span),
                )
            })
            .collect();

        let results = join_all(handles).await;

        let mut summary = RunSummary { endpoints: endpoints.len(), ..RunSummary::default() };
        for (endpoint, result) in endpoints.iter().zip(results) {
            match result {
                Ok(result) => summary.record(&result),
                Err(e) => {
                    // Nothing was delivered for this endpoint
                    error!(endpoint = %endpoint, error = %e, "Health-check task aborted");
                    summary.failing += 1;
                    summary.alerts_undelivered += 1;
                }
            }
        }

        info!(
            endpoints = summary.endpoints,
            healthy = summary.healthy,
            failing = summary.failing,
            alerts_delivered = summary.alerts_delivered,
            alerts_undelivered = summary.alerts_undelivered,
            "Health-check pass finished"
        );

        Ok(summary)
    }
}

/// Probe one endpoint and alert if it failed.
async fn check_endpoint(
    prober: &dyn Prober,
    gateway: &NotifierGateway,
    endpoint: &str,
) -> EndpointResult {
    let report = prober.probe(endpoint).await;

    if report.is_success() {
        return EndpointResult { delivery: None };
    }

    warn!(
        endpoint,
        outcome = %report.outcome,
        elapsed_ms = report.outcome.elapsed_ms(),
        "Endpoint failed health check"
    );

    let alert = Alert::from_report(&report);
    let delivery = gateway.send(&alert).await;

    EndpointResult { delivery: Some(delivery) }
}
