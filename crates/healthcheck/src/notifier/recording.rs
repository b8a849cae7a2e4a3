//! In-memory notifier for tests and embedding.

use std::sync::Mutex;

use super::{Notifier, NotifyError, PublishReceipt};

/// One call to [`Notifier::publish`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug)]
enum Reply {
    Status(u16),
    Error(String),
}

/// Records every publish and answers with a fixed reply.
#[derive(Debug)]
pub struct RecordingNotifier {
    reply: Reply,
    published: Mutex<Vec<PublishedMessage>>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingNotifier {
    /// Accepts everything with status 200
    pub fn new() -> Self {
        Self::with_status(200)
    }

    pub fn with_status(status_code: u16) -> Self {
        Self { reply: Reply::Status(status_code), published: Mutex::new(Vec::new()) }
    }

    /// Fails every publish with `error`
    pub fn failing(error: impl Into<String>) -> Self {
        Self { reply: Reply::Error(error.into()), published: Mutex::new(Vec::new()) }
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published.lock().map(|published| published.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<PublishReceipt, NotifyError> {
        if let Ok(mut published) = self.published.lock() {
            published.push(PublishedMessage {
                topic: topic.to_string(),
                subject: subject.to_string(),
                message: message.to_string(),
            });
        }

        match &self.reply {
            Reply::Status(status_code) => Ok(PublishReceipt { status_code: *status_code }),
            Reply::Error(error) => Err(NotifyError::PublishFailed(error.clone())),
        }
    }
}
