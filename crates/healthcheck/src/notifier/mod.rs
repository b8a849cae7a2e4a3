//! Notifier gateway - delivers alerts through an external channel.
//!
//! [`Notifier`] is the external collaborator (topic publish). The
//! [`NotifierGateway`] binds a notifier to a topic and turns every
//! delivery problem into a [`DeliveryResult`] so that one endpoint's
//! failed alert never affects another's.

pub mod log;
pub mod recording;
pub mod webhook;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::alert::Alert;

pub use log::LogNotifier;
pub use recording::RecordingNotifier;
pub use webhook::WebhookNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to publish notification: {0}")]
    PublishFailed(String),

    #[error("Invalid notifier configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Acknowledgement returned by the channel for one publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub status_code: u16,
}

impl PublishReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// A channel that alerts can be published to.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Short name used in logs (e.g. "webhook")
    fn type_name(&self) -> &str;

    /// Publish one message to `topic`.
    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<PublishReceipt, NotifyError>;
}

/// Whether an alert reached its channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub ok: bool,
    pub detail: String,
}

impl DeliveryResult {
    fn delivered(detail: impl Into<String>) -> Self {
        Self { ok: true, detail: detail.into() }
    }

    fn undelivered(detail: impl Into<String>) -> Self {
        Self { ok: false, detail: detail.into() }
    }
}

/// Sends alerts to a fixed topic.
#[derive(Clone)]
pub struct NotifierGateway {
    notifier: Arc<dyn Notifier>,
    topic: String,
}

impl NotifierGateway {
    pub fn new(notifier: Arc<dyn Notifier>, topic: impl Into<String>) -> Self {
        Self { notifier, topic: topic.into() }
    }

    /// Dispatch one alert. Never retries and never fails the caller.
    pub async fn send(&self, alert: &Alert) -> DeliveryResult {
        info!(
            endpoint = %alert.endpoint,
            topic = %self.topic,
            notifier = self.notifier.type_name(),
            "Dispatching alert"
        );

        let result = match self.notifier.publish(&self.topic, &alert.subject, &alert.body).await {
            Ok(receipt) if receipt.is_success() => {
                DeliveryResult::delivered(format!("published with status {}", receipt.status_code))
            }
            Ok(receipt) => DeliveryResult::undelivered(format!(
                "channel answered with status {}",
                receipt.status_code
            )),
            Err(e) => DeliveryResult::undelivered(e.to_string()),
        };

        if result.ok {
            info!(endpoint = %alert.endpoint, detail = %result.detail, "Alert delivered");
        } else {
            error!(endpoint = %alert.endpoint, detail = %result.detail, "Alert delivery failed");
        }

        result
    }
}
