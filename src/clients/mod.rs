pub mod gemini_client;
pub mod xai_client;

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no content in model response")]
    MissingContent,
}

/// Endpoint, model and key for one generative backend.
#[derive(Debug, Clone)]
pub struct ModelEndpoint {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl ModelEndpoint {
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}
