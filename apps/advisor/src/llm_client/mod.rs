/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: no other module talks to the model endpoint directly.
/// Everything goes through a `GenerativeModel`, which in production is `GeminiClient`.
///
/// One request per call. No retry, no backoff: failure handling belongs to the
/// fallback boundary in `advice::fallback`.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GeminiSettings;
use crate::errors::EndpointError;

pub mod prompts;

#[cfg(test)]
pub(crate) mod testing;

use prompts::Prompt;

const JSON_MIME_TYPE: &str = "application/json";

/// What kind of text the caller expects back.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMode {
    /// Natural-language prose.
    PlainText,
    /// JSON, optionally constrained by a response schema.
    Json { schema: Option<Value> },
}

/// A fully built request for one model call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub user_text: String,
    pub output: OutputMode,
}

impl GenerationRequest {
    pub fn plain(prompt: &Prompt) -> Self {
        Self {
            system_instruction: prompt.system_instruction.clone(),
            user_text: prompt.user_text.clone(),
            output: OutputMode::PlainText,
        }
    }

    pub fn json(prompt: &Prompt, schema: Option<Value>) -> Self {
        Self {
            system_instruction: prompt.system_instruction.clone(),
            user_text: prompt.user_text.clone(),
            output: OutputMode::Json { schema },
        }
    }
}

/// The model seam. Implement this to swap the endpoint without touching callers.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends one request and returns the raw text, which may be empty.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, EndpointError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate's parts. Empty when there is none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` client. Cheap to clone; the handle holds no per-call state.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, EndpointError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                settings.api_base.trim_end_matches('/'),
                settings.model
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Makes a raw call and returns the decoded response envelope.
    pub async fn call(&self, request: &GenerationRequest) -> Result<GeminiResponse, EndpointError> {
        let body = build_request_body(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            warn!("Gemini API returned {}: {}", status, raw);
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(EndpointError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: GeminiResponse =
            serde_json::from_str(&raw).map_err(EndpointError::Envelope)?;

        if let Some(reason) = decoded
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(EndpointError::Blocked { reason });
        }

        if let Some(usage) = &decoded.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(decoded)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, EndpointError> {
        let response = self.call(request).await?;
        Ok(response.text())
    }
}

fn build_request_body(request: &GenerationRequest) -> GeminiRequest<'_> {
    let generation_config = match &request.output {
        OutputMode::PlainText => None,
        OutputMode::Json { schema } => Some(GenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: schema.as_ref(),
        }),
    };

    GeminiRequest {
        system_instruction: request.system_instruction.as_deref().map(|text| GeminiContent {
            role: None,
            parts: vec![GeminiPart { text }],
        }),
        contents: vec![GeminiContent {
            role: Some("user"),
            parts: vec![GeminiPart {
                text: &request.user_text,
            }],
        }],
        generation_config,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match stripped {
        Some(inner) => inner
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(inner.trim_start()),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> GeminiClient {
        let settings = GeminiSettings {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_base: server.uri(),
            timeout: Duration::from_secs(5),
        };
        GeminiClient::new(&settings).unwrap()
    }

    fn prompt() -> Prompt {
        Prompt::with_system("You are a helpful health advisor.", "Symptoms: fever")
    }

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"} ";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_request_body_json_mode_carries_schema() {
        let schema = json!({"type": "OBJECT"});
        let request = GenerationRequest::json(&prompt(), Some(schema));
        let body = serde_json::to_value(build_request_body(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "systemInstruction": {"parts": [{"text": "You are a helpful health advisor."}]},
                "contents": [{"role": "user", "parts": [{"text": "Symptoms: fever"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })
        );
    }

    #[test]
    fn test_request_body_plain_mode_without_system_instruction() {
        let request = GenerationRequest::plain(&Prompt::user("Hello"));
        let body = serde_json::to_value(build_request_body(&request)).unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "Hello"}]}]})
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}]
        }))
        .unwrap();
        assert_eq!(response.text(), "{\"a\": 1}");
    }

    #[test]
    fn test_response_text_empty_without_candidates() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), "");
    }

    #[tokio::test]
    async fn test_generate_sends_key_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "Symptoms: fever"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Rest and hydrate."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let text = client
            .generate(&GenerationRequest::plain(&prompt()))
            .await
            .unwrap();
        assert_eq!(text, "Rest and hydrate.");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&GenerationRequest::plain(&prompt()))
            .await
            .unwrap_err();
        match err {
            EndpointError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_endpoint_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&GenerationRequest::plain(&prompt()))
            .await
            .unwrap_err();
        assert!(matches!(err, EndpointError::Blocked { reason } if reason == "SAFETY"));
    }

    #[tokio::test]
    async fn test_garbage_envelope_is_endpoint_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&GenerationRequest::plain(&prompt()))
            .await
            .unwrap_err();
        assert!(matches!(err, EndpointError::Envelope(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let settings = GeminiSettings {
            api_key: "k".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
        };
        let err = GeminiClient::new(&settings)
            .unwrap()
            .generate(&GenerationRequest::plain(&prompt()))
            .await
            .unwrap_err();
        assert!(matches!(err, EndpointError::Http(_)));
    }
}
