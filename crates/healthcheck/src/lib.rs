//! Health checks for a configurable set of HTTP endpoints.
//!
//! One pass reads the endpoint list from a [`ConfigStore`], probes every
//! endpoint concurrently with its own deadline, and routes each failing
//! endpoint through the [`alert`] formatter and a [`NotifierGateway`].

pub mod alert;
pub mod notifier;
pub mod orchestrator;
pub mod probe;
pub mod store;

pub use alert::{Alert, format_alert};
pub use notifier::{DeliveryResult, Notifier, NotifierGateway, NotifyError, PublishReceipt};
pub use orchestrator::{EndpointSource, Orchestrator, OrchestratorError, RunSummary};
pub use probe::{HttpProber, ProbeOutcome, ProbeReport, ProbeSettings, Prober};
pub use store::{ConfigStore, FileStore, MemoryStore, StoreError};

/// Key under which the endpoint list is stored.
pub const ENDPOINTS_KEY: &str = "endpoints";
