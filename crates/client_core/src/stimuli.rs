use anyhow::Result;
use reqwest::Client;
use shared::domain::{demo_stimuli, Stimulus};
use tracing::warn;

/// Fetches the stimulus set from the data endpoint, degrading to the
/// built-in demo set on any failure. Loading never fails.
pub struct StimulusSource {
    http: Client,
    base_url: String,
}

impl StimulusSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn load(&self) -> Vec<Stimulus> {
        match self.fetch().await {
            Ok(stimuli) => stimuli,
            Err(error) => {
                warn!(%error, "stimulus fetch failed, using demo data");
                demo_stimuli()
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Stimulus>> {
        let res = self
            .http
            .get(format!("{}/api/data", self.base_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}
