use tracing::warn;

use super::{Notifier, NotifyError, PublishReceipt};

/// Writes alerts to the log instead of an external channel.
///
/// Useful for dry runs and local setups; always reports success.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    fn type_name(&self) -> &str {
        "log"
    }

    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<PublishReceipt, NotifyError> {
        warn!(topic, subject, message, "ALERT");
        Ok(PublishReceipt { status_code: 200 })
    }
}
