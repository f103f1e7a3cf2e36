use reqwest::{Client, StatusCode};
use shared::domain::BatchCallId;
use shared::protocol::{BatchCallDetail, BatchCallsEnvelope, BatchCallSummary};
use thiserror::Error;
use tracing::debug;

mod badge;
mod views;

pub use badge::{badge_for_status, Badge, BadgeStyle};
pub use views::{DetailView, ListRender, ListView, RecipientStats};

#[derive(Debug, Error)]
pub enum BatchApiError {
    #[error("batch call not found")]
    NotFound,
    #[error("batch call API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("batch call API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the external batch-calling backend. Holds no cached
/// state; callers re-fetch after every mutation.
pub struct BatchCallClient {
    http: Client,
    base_url: String,
}

impl BatchCallClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub async fn list_batch_calls(&self) -> Result<Vec<BatchCallSummary>, BatchApiError> {
        debug!("fetching batch call list");
        let response = self
            .http
            .get(format!("{}/api/batch-calls", self.base_url))
            .send()
            .await?;
        let envelope: BatchCallsEnvelope = Self::expect_success(response).await?.json().await?;
        Ok(envelope.batch_calls)
    }

    pub async fn get_batch_call(&self, id: &BatchCallId) -> Result<BatchCallDetail, BatchApiError> {
        debug!(%id, "fetching batch call");
        let response = self
            .http
            .get(format!("{}/api/batch-calls/{id}", self.base_url))
            .send()
            .await?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn cancel_batch_call(&self, id: &BatchCallId) -> Result<(), BatchApiError> {
        debug!(%id, "cancelling batch call");
        let response = self
            .http
            .delete(format!("{}/api/batch-calls/{id}", self.base_url))
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    pub async fn retry_batch_call(&self, id: &BatchCallId) -> Result<(), BatchApiError> {
        debug!(%id, "retrying batch call");
        let response = self
            .http
            .post(format!("{}/api/batch-calls/{id}/retry", self.base_url))
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn expect_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BatchApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(BatchApiError::NotFound);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BatchApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
