use async_trait::async_trait;
use serde_json::Value;

use crate::clients::{gemini_client, xai_client, ClientError, ModelEndpoint};

/// A remote generative model answering a prompt with text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<String, ClientError>;

    /// Whether a credential is configured. Callers skip the request when not.
    fn has_credential(&self) -> bool;
}

pub struct XaiService {
    http: reqwest::Client,
    endpoint: ModelEndpoint,
}

impl XaiService {
    pub fn new(http: reqwest::Client, endpoint: ModelEndpoint) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl ModelClient for XaiService {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<String, ClientError> {
        xai_client::query_xai(&self.http, &self.endpoint, prompt, schema).await
    }

    fn has_credential(&self) -> bool {
        self.endpoint.has_credential()
    }
}

pub struct GeminiService {
    http: reqwest::Client,
    endpoint: ModelEndpoint,
}

impl GeminiService {
    pub fn new(http: reqwest::Client, endpoint: ModelEndpoint) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl ModelClient for GeminiService {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<String, ClientError> {
        gemini_client::query_gemini(&self.http, &self.endpoint, prompt, schema).await
    }

    fn has_credential(&self) -> bool {
        self.endpoint.has_credential()
    }
}
