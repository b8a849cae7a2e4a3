//! Probe executor - performs a single bounded HTTP check per endpoint
//!
//! This module is responsible for:
//! - Issuing the GET with a per-probe deadline
//! - Measuring elapsed time for every outcome
//! - Classifying the result into a [`ProbeOutcome`]

pub mod http;
pub mod types;

pub use http::{DEFAULT_PROBE_TIMEOUT, HttpProber, ProbeBuildError, ProbeSettings, Prober};
pub use types::{ProbeOutcome, ProbeReport};
