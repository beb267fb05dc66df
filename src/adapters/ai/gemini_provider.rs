//! Gemini Provider - Implementation of AIProvider for Google's Gemini API.
//!
//! Uses the `generateContent` REST endpoint. JSON output is requested with
//! `responseMimeType: application/json` plus a `responseSchema`, so the
//! model's text part is itself the JSON document.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.0-flash")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, ResponseFormat, TokenUsage,
};

/// Default model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default API host.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a configuration from an already-wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider. Fails if the key is blank or the HTTP
    /// client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        if config.api_key().trim().is_empty() {
            return Err(AIError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|msg| GeminiContent {
                role: Some(
                    match msg.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart {
                    text: Some(msg.content.clone()),
                }],
            })
            .collect();

        let system_instruction = request.system_prompt.as_ref().map(|prompt| GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: Some(prompt.clone()),
            }],
        });

        let (response_mime_type, response_schema) = match &request.response_format {
            ResponseFormat::Text => (None, None),
            ResponseFormat::Json { schema } => {
                (Some("application/json".to_string()), Some(schema.clone()))
            }
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                response_mime_type,
                response_schema,
            },
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = Self::to_gemini_request(request);

        debug!(
            model = %self.config.model,
            request_id = %request.metadata.request_id,
            generation = request.metadata.generation,
            "Sending Gemini generateContent request"
        );

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Maps a non-success status to an error.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Gemini request failed");
        Err(error_for_status(status.as_u16(), &error_body))
    }

    /// Parses a successful response body.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(gemini_response, &self.config.model)
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        // Single attempt; retries are a user decision.
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

/// Maps an HTTP error status and body to a provider error.
fn error_for_status(status: u16, body: &str) -> AIError {
    match status {
        400 if body.contains("API key not valid") || body.contains("API_KEY_INVALID") => {
            AIError::AuthenticationFailed
        }
        400 => AIError::InvalidRequest(body.to_string()),
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(body)),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Reads `retryDelay` (e.g. `"17s"`) from a Gemini error body.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<Value>(error_body)
        .ok()
        .and_then(|parsed| {
            parsed
                .get("error")?
                .get("details")?
                .as_array()?
                .iter()
                .find_map(|detail| detail.get("retryDelay")?.as_str().map(str::to_string))
        })
        .and_then(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
        .map(|secs| secs.ceil() as u32)
        .unwrap_or(60)
}

/// Converts a decoded response into the port's response type.
fn into_completion(response: GeminiResponse, fallback_model: &str) -> Result<CompletionResponse, AIError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AIError::content_filtered(reason));
        }
        return Err(AIError::EmptyResponse);
    };

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
            FinishReason::ContentFilter
        }
        Some(_) => FinishReason::Other,
    };

    let content = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(match finish_reason {
            FinishReason::ContentFilter => AIError::content_filtered(
                candidate.finish_reason.unwrap_or_else(|| "SAFETY".to_string()),
            ),
            _ => AIError::EmptyResponse,
        });
    }

    let usage = response
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage,
        model: response
            .model_version
            .unwrap_or_else(|| fallback_model.to_string()),
        finish_reason,
    })
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::InsightRequestId;
    use crate::ports::RequestMetadata;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(InsightRequestId::new(), 1))
            .with_system_prompt("Act as an estimator.")
            .with_message(MessageRole::User, "Review this.")
            .with_json_schema(json!({"type": "OBJECT"}))
    }

    fn decode(body: Value) -> GeminiResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("test-key")
            .with_model("gemini-1.5-pro")
            .with_base_url("https://proxy.example.com/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, "https://proxy.example.com/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_debug_hides_key() {
        let config = GeminiConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn blank_key_is_rejected() {
        assert!(matches!(
            GeminiProvider::new(GeminiConfig::new("  ")),
            Err(AIError::MissingCredentials)
        ));
    }

    #[test]
    fn generate_url_joins_base_and_model() {
        let provider = GeminiProvider::new(
            GeminiConfig::new("k").with_base_url("https://proxy.example.com/"),
        )
        .unwrap();
        assert_eq!(
            provider.generate_url(),
            "https://proxy.example.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn request_serializes_in_gemini_shape() {
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request())).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Review this.");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Act as an estimator.");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn text_request_omits_json_settings() {
        let request = CompletionRequest::new(RequestMetadata::new(InsightRequestId::new(), 1))
            .with_message(MessageRole::User, "hi");
        let body = serde_json::to_value(GeminiProvider::to_gemini_request(&request)).unwrap();
        assert!(body["generationConfig"].get("responseMimeType").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn parses_successful_response() {
        let response = decode(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"summary\":"}, {"text": "\"ok\"}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 80, "totalTokenCount": 200},
            "modelVersion": "gemini-2.0-flash-001"
        }));

        let completion = into_completion(response, "fallback").unwrap();
        assert_eq!(completion.content, "{\"summary\":\"ok\"}");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
        assert_eq!(completion.usage.total_tokens, 200);
        assert_eq!(completion.model, "gemini-2.0-flash-001");
    }

    #[test]
    fn missing_model_version_uses_configured_model() {
        let response = decode(json!({
            "candidates": [{"content": {"parts": [{"text": "hello"}]}}]
        }));
        let completion = into_completion(response, "gemini-2.0-flash").unwrap();
        assert_eq!(completion.model, "gemini-2.0-flash");
        assert_eq!(completion.usage, TokenUsage::default());
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let response = decode(json!({"candidates": []}));
        assert_eq!(into_completion(response, "m").unwrap_err(), AIError::EmptyResponse);
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let response = decode(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        assert!(matches!(
            into_completion(response, "m"),
            Err(AIError::ContentFiltered { reason }) if reason == "SAFETY"
        ));
    }

    #[test]
    fn safety_stop_without_text_is_content_filtered() {
        let response = decode(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }));
        assert!(matches!(
            into_completion(response, "m"),
            Err(AIError::ContentFiltered { .. })
        ));
    }

    #[test]
    fn max_tokens_maps_to_length() {
        let response = decode(json!({
            "candidates": [{"content": {"parts": [{"text": "partial"}]}, "finishReason": "MAX_TOKENS"}]
        }));
        assert_eq!(
            into_completion(response, "m").unwrap().finish_reason,
            FinishReason::Length
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(error_for_status(401, ""), AIError::AuthenticationFailed);
        assert_eq!(error_for_status(403, ""), AIError::AuthenticationFailed);
        assert_eq!(
            error_for_status(400, r#"{"error":{"message":"API key not valid. Please pass a valid API key."}}"#),
            AIError::AuthenticationFailed
        );
        assert!(matches!(error_for_status(400, "bad schema"), AIError::InvalidRequest(_)));
        assert!(matches!(error_for_status(503, "overloaded"), AIError::Unavailable { .. }));
        assert!(matches!(error_for_status(418, "teapot"), AIError::Network(_)));
    }

    #[test]
    fn rate_limit_reads_retry_delay() {
        let body = r#"{"error":{"code":429,"details":[{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"17s"}]}}"#;
        assert_eq!(error_for_status(429, body), AIError::rate_limited(17));
    }

    #[test]
    fn rate_limit_defaults_without_delay() {
        assert_eq!(parse_retry_after("not json"), 60);
        assert_eq!(parse_retry_after(r#"{"error":{"message":"quota"}}"#), 60);
    }

    #[test]
    fn provider_info_reports_model() {
        let provider = GeminiProvider::new(GeminiConfig::new("k").with_model("gemini-1.5-flash")).unwrap();
        let info = provider.provider_info();
        assert_eq!(info.name, "gemini");
        assert_eq!(info.model, "gemini-1.5-flash");
    }
}
