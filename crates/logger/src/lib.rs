//! Shared tracing setup for the health-check binaries.

mod subscriber;

pub use subscriber::init_tracing;
