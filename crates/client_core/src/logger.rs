use async_trait::async_trait;
use reqwest::Client;
use shared::domain::TrialEvent;
use tracing::warn;

/// Outcome of a single delivery attempt. Failures are reported to the
/// caller, never retried, and never interrupt the trial flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmitOutcome::Delivered)
    }
}

/// Submission channel for trial events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn submit(&self, event: &TrialEvent) -> SubmitOutcome;
}

/// Submits each event to the logging service exactly once.
pub struct HttpEventLogger {
    http: Client,
    base_url: String,
}

impl HttpEventLogger {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EventSink for HttpEventLogger {
    async fn submit(&self, event: &TrialEvent) -> SubmitOutcome {
        let res = self
            .http
            .post(format!("{}/api/log", self.base_url))
            .json(event)
            .send()
            .await;

        match res {
            Ok(res) if res.status().is_success() => SubmitOutcome::Delivered,
            Ok(res) => {
                let reason = format!("logging service replied {}", res.status());
                warn!(%reason, "trial event rejected");
                SubmitOutcome::Failed(reason)
            }
            Err(error) => {
                warn!(%error, "trial event submission failed");
                SubmitOutcome::Failed(error.to_string())
            }
        }
    }
}
