//! Access to the remote mood store.
//!
//! The store is an external webhook service with two endpoints: one that lists
//! every mood record and one that accepts a new mood and answers with the
//! updated record for the day.

use crate::errors::StoreError;
use crate::models::{MoodRecord, SubmitRequest, SubmitResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

#[async_trait]
pub trait MoodStore: Send + Sync {
    /// Every record known to the store, in the order the store returns them.
    async fn fetch_moods(&self) -> Result<Vec<MoodRecord>, StoreError>;

    /// Posts a mood and returns the record the store updated or created.
    async fn submit_mood(&self, request: &SubmitRequest) -> Result<MoodRecord, StoreError>;
}

/// `MoodStore` backed by the two HTTP webhooks.
#[derive(Debug, Clone)]
pub struct WebhookStore {
    client: Client,
    moods_url: String,
    submit_url: String,
}

impl WebhookStore {
    pub fn new(moods_url: impl Into<String>, submit_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), moods_url, submit_url)
    }

    pub fn with_client(
        client: Client,
        moods_url: impl Into<String>,
        submit_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            moods_url: moods_url.into(),
            submit_url: submit_url.into(),
        }
    }
}

#[async_trait]
impl MoodStore for WebhookStore {
    async fn fetch_moods(&self) -> Result<Vec<MoodRecord>, StoreError> {
        debug!(url = %self.moods_url, "fetching moods");
        let response = self.client.get(&self.moods_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn submit_mood(&self, request: &SubmitRequest) -> Result<MoodRecord, StoreError> {
        debug!(url = %self.submit_url, "submitting mood");
        let response = self
            .client
            .post(&self.submit_url)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: SubmitResponse = serde_json::from_slice(&body)?;
        parsed.into_record().ok_or(StoreError::EmptyResponse)
    }
}
