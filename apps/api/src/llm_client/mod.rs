/// LLM client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini REST API directly.
/// Contract analysis, reference chat, and embeddings all go through this module.
use std::time::Duration;

use base64::Engine;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Vision + JSON model used for contract OCR and risk analysis.
pub const ANALYSIS_MODEL: &str = "gemini-2.5-pro";
/// Faster text model used for the labor-law chat.
pub const CHAT_MODEL: &str = "gemini-2.0-flash-exp";
pub const EMBEDDING_MODEL: &str = "models/embedding-001";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent / embedContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Inline file content, base64-encoded as the API expects.
    pub fn bytes(data: &[u8], mime_type: &str) -> Self {
        Part::InlineData {
            inline_data: Blob {
                mime_type: mime_type.to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(data),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: &'a [Part],
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: [Part; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequestBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

/// A single generateContent call.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub system: Option<&'a str>,
    pub parts: Vec<Part>,
    pub temperature: f32,
    pub json_output: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct EmbedRequestBody<'a> {
    model: &'a str,
    content: EmbedContent<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: [EmbedPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by every service.
/// Wraps the Gemini REST API with retry logic and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    backoff_base: Duration,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, GEMINI_API_BASE)
    }

    /// Client against a non-default endpoint (proxy or local stub).
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(300))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            backoff_base: Duration::from_secs(1),
        })
    }

    /// Makes a raw generateContent call, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn generate(&self, request: &GenerateRequest<'_>) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = GenerateRequestBody {
            system_instruction: request.system.map(|s| SystemInstruction {
                parts: [Part::text(s)],
            }),
            contents: vec![Content {
                role: "user",
                parts: &request.parts,
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_mime_type: request.json_output.then_some("application/json"),
            },
        };

        let response = self.post_with_retry(&url, &body).await?;
        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                request.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(llm_response)
    }

    /// Convenience method that calls the LLM and returns its text.
    pub async fn generate_text(&self, request: &GenerateRequest<'_>) -> Result<String, LlmError> {
        let response = self.generate(request).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }

    /// Calls the LLM and deserializes the text response as JSON.
    /// The request should set `json_output` or the prompt must demand raw JSON.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        request: &GenerateRequest<'_>,
    ) -> Result<T, LlmError> {
        let text = self.generate_text(request).await?;
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }

    /// Embeds one piece of text with the embedding model.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = format!("{}/{EMBEDDING_MODEL}:embedContent", self.base_url);
        let body = EmbedRequestBody {
            model: EMBEDDING_MODEL,
            content: EmbedContent {
                parts: [EmbedPart { text }],
            },
        };
        let response = self.post_with_retry(&url, &body).await?;
        let parsed: EmbedResponse = response.json().await?;
        if parsed.embedding.values.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(parsed.embedding.values)
    }

    async fn post_with_retry<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(self.backoff_base, attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Exponential backoff before retry `attempt` (1-based): base, 2x base, 4x base.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * (1 << attempt.saturating_sub(1))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_inline_part_is_base64_camel_case() {
        let part = Part::bytes(b"PDF", "application/pdf");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(json["inlineData"]["data"], "UERG");
    }

    #[test]
    fn test_request_body_shape() {
        let parts = vec![Part::text("분석해주세요")];
        let body = GenerateRequestBody {
            system_instruction: Some(SystemInstruction {
                parts: [Part::text("system")],
            }),
            contents: vec![Content {
                role: "user",
                parts: &parts,
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: Some("application/json"),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "system");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "분석해주세요");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{
            "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3}
        }"#;
        let response: LlmResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: LlmResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_backoff_doubles_from_one_second() {
        let base = Duration::from_secs(1);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(4));
    }

    // ── Retry behaviour against a local Gemini stand-in ──

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Router;

    const OK_BODY: &str = r#"{"candidates": [{"content": {"parts": [{"text": "안녕하세요"}]}}]}"#;

    struct Scripted {
        statuses: Vec<u16>,
        hits: AtomicUsize,
    }

    async fn scripted_reply(State(script): State<Arc<Scripted>>) -> Response {
        let n = script.hits.fetch_add(1, Ordering::SeqCst);
        let code = script.statuses[n.min(script.statuses.len() - 1)];
        let status = StatusCode::from_u16(code).unwrap();
        let body = if status.is_success() {
            OK_BODY.to_string()
        } else {
            format!(r#"{{"error": {{"message": "status {code}"}}}}"#)
        };
        (status, [("content-type", "application/json")], body).into_response()
    }

    async fn stub_server(statuses: &[u16]) -> (String, Arc<Scripted>) {
        let script = Arc::new(Scripted {
            statuses: statuses.to_vec(),
            hits: AtomicUsize::new(0),
        });
        let app = Router::new()
            .fallback(scripted_reply)
            .with_state(script.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), script)
    }

    fn fast_client(base_url: &str) -> LlmClient {
        LlmClient {
            backoff_base: Duration::from_millis(5),
            ..LlmClient::with_base_url("test-key".to_string(), base_url).unwrap()
        }
    }

    fn hello_request() -> GenerateRequest<'static> {
        GenerateRequest {
            model: CHAT_MODEL,
            system: None,
            parts: vec![Part::text("안녕")],
            temperature: 0.0,
            json_output: false,
        }
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_until_success() {
        let (base_url, script) = stub_server(&[503, 503, 200]).await;
        let text = fast_client(&base_url)
            .generate_text(&hello_request())
            .await
            .unwrap();
        assert_eq!(text, "안녕하세요");
        assert_eq!(script.hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_rate_limit_exhausts_three_attempts() {
        let (base_url, script) = stub_server(&[429]).await;
        let err = fast_client(&base_url)
            .generate_text(&hello_request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 429, .. }));
        assert_eq!(script.hits.load(Ordering::SeqCst), MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let (base_url, script) = stub_server(&[400, 200]).await;
        let err = fast_client(&base_url)
            .generate_text(&hello_request())
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "status 400");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(script.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_backoff_waits_one_then_two_seconds() {
        let (base_url, script) = stub_server(&[503, 503, 200]).await;
        let client = LlmClient::with_base_url("test-key".to_string(), &base_url).unwrap();
        let started = tokio::time::Instant::now();
        client.generate_text(&hello_request()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert_eq!(script.hits.load(Ordering::SeqCst), 3);
    }
}
