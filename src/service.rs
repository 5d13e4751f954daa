//! Client for the remote formatting endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("formatting service answered {0}")]
    Status(StatusCode),
    #[error("formatting request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that turns raw text into its formatted form.
#[async_trait]
pub trait FormatService: Send + Sync {
    /// Format `text`. A successful answer without an `output` field yields an
    /// empty string.
    async fn format(&self, text: &str) -> Result<String, FormatError>;
}

#[async_trait]
impl<T: FormatService + ?Sized> FormatService for std::sync::Arc<T> {
    async fn format(&self, text: &str) -> Result<String, FormatError> {
        (**self).format(text).await
    }
}

#[derive(Serialize)]
struct FormatRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct FormatResponse {
    #[serde(default)]
    output: Option<String>,
}

pub struct HttpFormatService {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpFormatService {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            timeout,
        }
    }
}

#[async_trait]
impl FormatService for HttpFormatService {
    async fn format(&self, text: &str) -> Result<String, FormatError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .json(&FormatRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FormatError::Status(status));
        }

        let body: FormatResponse = response.json().await?;
        Ok(body.output.unwrap_or_default())
    }
}
