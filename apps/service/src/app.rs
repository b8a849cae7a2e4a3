//! Builds the orchestrator's collaborators once per process.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use healthcheck::notifier::{LogNotifier, WebhookNotifier};
use healthcheck::{
    ConfigStore, EndpointSource, FileStore, HttpProber, MemoryStore, Notifier, NotifierGateway,
    Orchestrator, ProbeSettings,
};
use tracing::info;

use crate::cli::Cli;
use crate::config::{Config, NotifierKind};

pub fn build_orchestrator(config: &Config, cli: &Cli) -> Result<Orchestrator> {
    let source =
        EndpointSource { table: config.store.table.clone(), key: config.store.key.clone() };

    let store: Arc<dyn ConfigStore> = if cli.endpoints.is_empty() {
        info!(path = %config.store.path.display(), "Reading endpoints from file store");
        Arc::new(FileStore::new(&config.store.path))
    } else {
        info!(count = cli.endpoints.len(), "Using endpoints from the command line");
        Arc::new(MemoryStore::new().with_entry(
            source.table.clone(),
            source.key.clone(),
            cli.endpoints.iter().cloned(),
        ))
    };

    let mut settings = ProbeSettings {
        timeout: Duration::from_millis(cli.timeout_ms.unwrap_or(config.probe.timeout_ms)),
        ..ProbeSettings::default()
    };
    if let Some(user_agent) = &config.probe.user_agent {
        settings.user_agent = user_agent.clone();
    }
    let prober = Arc::new(HttpProber::new(settings).context("Failed to create HTTP prober")?);

    let notifier = build_notifier(config)?;
    let gateway = NotifierGateway::new(notifier, config.notifier.topic.clone());

    Ok(Orchestrator::new(store, prober, gateway, source))
}

fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    match config.notifier.kind {
        NotifierKind::Log => Ok(Arc::new(LogNotifier::new())),
        NotifierKind::Webhook => {
            let url = config
                .notifier
                .url
                .as_deref()
                .context("notifier.url is required for the webhook notifier")?;
            let notifier =
                WebhookNotifier::new(url, Duration::from_millis(config.notifier.timeout_ms))
                    .context("Failed to create webhook notifier")?;
            Ok(Arc::new(notifier))
        }
    }
}
