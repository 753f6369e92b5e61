use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{ClientError, ModelEndpoint};

pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_MODEL: &str = "grok-3";

const SYSTEM_MESSAGE: &str = "You are a strict JSON calendar extraction engine. You read scheduling instructions and a user request and reply ONLY with JSON matching the provided schema, with no markdown, no backticks, and no extra text.";

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

fn build_request<'a>(endpoint: &'a ModelEndpoint, prompt: &str, schema: Option<&'a Value>) -> ChatRequest<'a> {
    ChatRequest {
        model: &endpoint.model,
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_MESSAGE.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            },
        ],
        max_tokens: 1500,
        temperature: 0.2,
        response_format: schema.map(|schema| ResponseFormat {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name: "calendar_events",
                strict: true,
                schema,
            },
        }),
    }
}

fn extract_content(body: &str) -> Result<String, ClientError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ClientError::MissingContent)
}

/// Chat completion against an OpenAI-compatible endpoint, optionally
/// constrained by a JSON schema. Returns the raw message content.
pub async fn query_xai(
    http: &reqwest::Client,
    endpoint: &ModelEndpoint,
    prompt: &str,
    schema: Option<&Value>,
) -> Result<String, ClientError> {
    let request = build_request(endpoint, prompt, schema);
    let url = format!("{}/chat/completions", endpoint.base_url.trim_end_matches('/'));

    let response = http
        .post(&url)
        .bearer_auth(endpoint.api_key.as_deref().unwrap_or_default())
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        warn!(status = status.as_u16(), body = %text, "xAI request failed");
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    debug!(bytes = text.len(), "xAI response received");
    extract_content(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint() -> ModelEndpoint {
        ModelEndpoint {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: Some("k".to_string()),
        }
    }

    #[test]
    fn request_carries_schema_as_response_format() {
        let schema = json!({"type": "object"});
        let endpoint = endpoint();
        let request = build_request(&endpoint, "gym tomorrow", Some(&schema));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "grok-3");
        assert_eq!(value["messages"][1]["content"], "gym tomorrow");
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["schema"], schema);
    }

    #[test]
    fn request_without_schema_omits_response_format() {
        let endpoint = endpoint();
        let value = serde_json::to_value(build_request(&endpoint, "hi", None)).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn extract_content_reads_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"{\"events\":[]}"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "{\"events\":[]}");
    }

    #[test]
    fn extract_content_without_choices_is_missing() {
        assert!(matches!(extract_content(r#"{"choices":[]}"#), Err(ClientError::MissingContent)));
        assert!(matches!(extract_content("not json"), Err(ClientError::Decode(_))));
    }
}
