//! LLM Client: the single point of entry for every model call in the service.
//!
//! No other module talks to the inference endpoint directly. Handlers and the
//! suggestion pipeline go through `LlmClient`, which owns the retry policy and
//! the response parsing helpers.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub mod bedrock;
pub mod prompts;

/// Amazon Nova Micro through a US cross-region inference profile.
pub const DEFAULT_MODEL_ID: &str = "us.amazon.nova-micro-v1:0";
const DEFAULT_MAX_TOKENS: i32 = 4000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TOP_P: f32 = 0.9;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference endpoint rejected credentials: {0}")]
    Auth(String),

    #[error("Inference endpoint throttled the request: {0}")]
    Throttled(String),

    #[error("Inference API error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("Inference transport error: {0}")]
    Transport(String),

    #[error("Could not build inference request: {0}")]
    Request(String),

    #[error("Inference endpoint returned empty content")]
    EmptyResponse,

    #[error("Inference endpoint returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl InferenceError {
    /// Throttling and transport failures are worth another attempt; everything
    /// else fails the same way twice.
    pub fn is_retryable(&self) -> bool {
        matches!(self, InferenceError::Throttled(_) | InferenceError::Transport(_))
    }
}

/// Model parameters and call policy. Built once at startup and handed to
/// `LlmClient::new`.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub model_id: String,
    pub max_tokens: i32,
    pub temperature: f32,
    pub top_p: f32,
    /// Total attempts per call. 1 means no retry.
    pub max_attempts: u32,
    /// Per-operation timeout. `None` keeps the SDK default.
    pub timeout: Option<Duration>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_attempts: 1,
            timeout: None,
        }
    }
}

/// One single-turn request to the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub model_id: String,
    pub system: Option<String>,
    pub prompt: String,
    pub max_tokens: i32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone)]
pub struct InferenceReply {
    pub text: String,
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
}

/// A hosted text-generation service. Implement this to point the client at a
/// different backend; tests use in-memory fakes.
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    async fn converse(&self, request: &InferenceRequest) -> Result<InferenceReply, InferenceError>;
}

#[derive(Clone)]
pub struct LlmClient {
    endpoint: Arc<dyn InferenceEndpoint>,
    config: InferenceConfig,
}

impl LlmClient {
    pub fn new(endpoint: Arc<dyn InferenceEndpoint>, config: InferenceConfig) -> Self {
        Self { endpoint, config }
    }

    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }

    /// Sends one prompt and returns the generated text untouched.
    ///
    /// Makes `max_attempts` attempts at most. Only retryable errors trigger
    /// another attempt, with exponential backoff starting at one second.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: Option<i32>,
    ) -> Result<String, InferenceError> {
        let request = InferenceRequest {
            model_id: self.config.model_id.clone(),
            system: (!system.is_empty()).then(|| system.to_string()),
            prompt: prompt.to_string(),
            max_tokens: max_tokens.unwrap_or(self.config.max_tokens),
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                // 1s, 2s, 4s, ...
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(6)));
                warn!(
                    "Inference attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            attempt += 1;

            match self.endpoint.converse(&request).await {
                Ok(reply) => {
                    debug!(
                        model = %request.model_id,
                        input_tokens = ?reply.input_tokens,
                        output_tokens = ?reply.output_tokens,
                        "Inference call succeeded"
                    );
                    if reply.text.trim().is_empty() {
                        return Err(InferenceError::EmptyResponse);
                    }
                    return Ok(reply.text);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!("Inference call failed: {e}");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Calls the model and reads its reply as a JSON object. Replies that hold
    /// no parseable object come back as `{fallback_key: <text>}`.
    pub async fn call_json_lenient(
        &self,
        prompt: &str,
        system: &str,
        max_tokens: Option<i32>,
        fallback_key: &str,
    ) -> Result<Value, InferenceError> {
        let text = self.call(prompt, system, max_tokens).await?;
        Ok(parse_json_object(&text).unwrap_or_else(|| json!({ fallback_key: text })))
    }
}

/// Finds the JSON object in a model reply. Tries the whole reply (minus code
/// fences) first, then the span between the first `{` and the last `}`.
pub fn parse_json_object(text: &str) -> Option<Value> {
    let stripped = strip_json_fences(text);
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(stripped) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
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
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Replays scripted replies in order and records every request it sees.
    #[derive(Default)]
    pub struct ScriptedEndpoint {
        replies: Mutex<VecDeque<Result<InferenceReply, InferenceError>>>,
        pub requests: Mutex<Vec<InferenceRequest>>,
        calls: AtomicUsize,
    }

    impl ScriptedEndpoint {
        pub fn replying(text: &str) -> Self {
            let endpoint = Self::default();
            endpoint.push_text(text);
            endpoint
        }

        pub fn push_text(&self, text: &str) {
            self.push(Ok(InferenceReply {
                text: text.to_string(),
                input_tokens: Some(10),
                output_tokens: Some(20),
            }));
        }

        pub fn push(&self, reply: Result<InferenceReply, InferenceError>) {
            self.replies.lock().unwrap().push_back(reply);
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.requests.lock().unwrap().last().map(|r| r.prompt.clone())
        }
    }

    #[async_trait]
    impl InferenceEndpoint for ScriptedEndpoint {
        async fn converse(
            &self,
            request: &InferenceRequest,
        ) -> Result<InferenceReply, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(InferenceError::EmptyResponse))
        }
    }

    pub fn client_with(endpoint: Arc<ScriptedEndpoint>, max_attempts: u32) -> LlmClient {
        LlmClient::new(
            endpoint,
            InferenceConfig {
                max_attempts,
                ..InferenceConfig::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{client_with, ScriptedEndpoint};
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_json_object_with_surrounding_prose() {
        let text = "Here is the analysis:\n{\"name\": \"Ada\", \"skills\": [\"Rust\"]}\nHope it helps!";
        let value = parse_json_object(text).unwrap();
        assert_eq!(value["name"], "Ada");
    }

    #[test]
    fn test_parse_json_object_rejects_arrays_and_prose() {
        assert!(parse_json_object("[1, 2, 3]").is_none());
        assert!(parse_json_object("No structure here.").is_none());
        assert!(parse_json_object("} backwards {").is_none());
    }

    #[tokio::test]
    async fn test_call_returns_text_verbatim() {
        let reply = "  1. Add Kubernetes to skills.\n2. Quantify impact.  ";
        let endpoint = Arc::new(ScriptedEndpoint::replying(reply));
        let client = client_with(endpoint.clone(), 1);

        let text = client.call("prompt", "system", None).await.unwrap();
        assert_eq!(text, reply);

        let requests = endpoint.requests.lock().unwrap();
        assert_eq!(requests[0].model_id, DEFAULT_MODEL_ID);
        assert_eq!(requests[0].system.as_deref(), Some("system"));
        assert_eq!(requests[0].max_tokens, 4000);
    }

    #[tokio::test]
    async fn test_call_without_system_prompt() {
        let endpoint = Arc::new(ScriptedEndpoint::replying("ok"));
        let client = client_with(endpoint.clone(), 1);
        client.call("prompt", "", Some(2000)).await.unwrap();

        let requests = endpoint.requests.lock().unwrap();
        assert!(requests[0].system.is_none());
        assert_eq!(requests[0].max_tokens, 2000);
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_response() {
        let endpoint = Arc::new(ScriptedEndpoint::replying("   \n"));
        let client = client_with(endpoint, 1);
        let err = client.call("prompt", "", None).await.unwrap_err();
        assert!(matches!(err, InferenceError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_single_attempt_by_default() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        endpoint.push(Err(InferenceError::Throttled("rate".to_string())));
        endpoint.push_text("never reached");
        let client = client_with(endpoint.clone(), 1);

        let err = client.call("prompt", "", None).await.unwrap_err();
        assert!(matches!(err, InferenceError::Throttled(_)));
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_throttling_when_configured() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        endpoint.push(Err(InferenceError::Throttled("rate".to_string())));
        endpoint.push(Err(InferenceError::Transport("reset".to_string())));
        endpoint.push_text("third time lucky");
        let client = client_with(endpoint.clone(), 3);

        let text = client.call("prompt", "", None).await.unwrap();
        assert_eq!(text, "third time lucky");
        assert_eq!(endpoint.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_failure_is_not_retried() {
        let endpoint = Arc::new(ScriptedEndpoint::default());
        endpoint.push(Err(InferenceError::Auth("denied".to_string())));
        endpoint.push_text("never reached");
        let client = client_with(endpoint.clone(), 3);

        let err = client.call("prompt", "", None).await.unwrap_err();
        assert!(matches!(err, InferenceError::Auth(_)));
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test]
    async fn test_call_json_lenient_falls_back_to_raw_text() {
        let endpoint = Arc::new(ScriptedEndpoint::replying("The CV lists Rust and Go."));
        let client = client_with(endpoint, 1);

        let value = client
            .call_json_lenient("prompt", "", None, "raw_analysis")
            .await
            .unwrap();
        assert_eq!(value["raw_analysis"], "The CV lists Rust and Go.");
    }

    #[tokio::test]
    async fn test_call_json_lenient_parses_fenced_json() {
        let endpoint = Arc::new(ScriptedEndpoint::replying(
            "```json\n{\"job_title\": \"Staff Engineer\"}\n```",
        ));
        let client = client_with(endpoint, 1);

        let value = client
            .call_json_lenient("prompt", "", None, "raw_analysis")
            .await
            .unwrap();
        assert_eq!(value["job_title"], "Staff Engineer");
    }
}
