use std::env::var;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing at INFO, overridable through `RUST_LOG`.
pub fn init_tracing() {
    initialize_tracing(LevelFilter::INFO);
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` refines the filter on top of `level`. `RUST_LOG_FORMAT=json`
/// gives one JSON object per line; anything else gives compact output.
fn initialize_tracing(level: LevelFilter) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT").unwrap_or_default();

    let log_layer = match log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer().json().with_filter(env_filter).boxed(),
        _ => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_filter(env_filter)
            .boxed(),
    };

    // Tests and embedders may have installed a subscriber already
    if tracing_subscriber::registry().with(log_layer).try_init().is_err() {
        return;
    }

    if !matches!(log_format.as_str(), "" | "json" | "compact") {
        warn!("Unknown RUST_LOG_FORMAT {log_format:?}, using compact output");
    }
}
