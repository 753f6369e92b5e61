use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{ClientError, ModelEndpoint};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn build_request(prompt: &str, json_output: bool) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(prompt.to_string()),
            }],
        }],
        generation_config: json_output.then_some(GenerationConfig {
            response_mime_type: "application/json",
        }),
    }
}

/// Text of the first part of the first candidate, `"{}"` when absent.
fn extract_text(body: &str) -> Result<String, ClientError> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_else(|| "{}".to_string());
    Ok(text)
}

/// `generateContent` call. A schema only switches the backend to JSON output;
/// the expected shape is spelled out in the prompt itself.
pub async fn query_gemini(
    http: &reqwest::Client,
    endpoint: &ModelEndpoint,
    prompt: &str,
    schema: Option<&Value>,
) -> Result<String, ClientError> {
    let request = build_request(prompt, schema.is_some());
    let url = format!(
        "{}/models/{}:generateContent",
        endpoint.base_url.trim_end_matches('/'),
        endpoint.model
    );

    let response = http
        .post(&url)
        .query(&[("key", endpoint.api_key.as_deref().unwrap_or_default())])
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        warn!(status = status.as_u16(), body = %text, "Gemini request failed");
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    debug!(bytes = text.len(), "Gemini response received");
    extract_text(&text)
}
