use std::path::PathBuf;

use clap::Parser;

/// Run one health-check pass over the configured endpoints.
///
/// Meant to be triggered by an external scheduler (cron, systemd timer,
/// a serverless schedule). Exits non-zero only when the endpoint list
/// cannot be read or the service cannot be wired up.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (created with defaults if missing)
    #[arg(short, long, env = "HEALTHCHECK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Check these endpoints instead of the configured store; repeatable
    #[arg(short, long = "endpoint", value_name = "URL")]
    pub endpoints: Vec<String>,

    /// Override the per-probe timeout
    #[arg(long, env = "HEALTHCHECK_TIMEOUT_MS", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}
