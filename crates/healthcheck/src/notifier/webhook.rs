use std::time::Duration;

use reqwest::{Client, Url, header};
use serde::Serialize;

use super::{Notifier, NotifyError, PublishReceipt};

/// Payload posted to the webhook
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    topic: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Publishes alerts by POSTing JSON to a bridge URL (topic, queue or
/// e-mail relay).
pub struct WebhookNotifier {
    client: Client,
    url: Url,
}

impl WebhookNotifier {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let url = Url::parse(url)
            .map_err(|e| NotifyError::InvalidConfiguration(format!("Invalid webhook URL: {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(NotifyError::InvalidConfiguration(format!(
                    "Unsupported webhook scheme: {other}"
                )));
            }
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    fn type_name(&self) -> &str {
        "webhook"
    }

    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<PublishReceipt, NotifyError> {
        let payload = WebhookPayload { topic, subject, message };

        let response = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        Ok(PublishReceipt { status_code: response.status().as_u16() })
    }
}
