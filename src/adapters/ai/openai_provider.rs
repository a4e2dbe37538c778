//! OpenAI-compatible Provider - Implementation of AIProvider over the chat completions API.
//!
//! Works against any endpoint that speaks the OpenAI `/chat/completions`
//! protocol (OpenAI itself, vLLM, Ollama, LM Studio, ...).
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(GenerationParameters::new("gpt-3.5-turbo"))
//!     .with_api_key("sk-...")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, GenerationParameters, MessageRole,
    ProviderInfo,
};

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication. Omitted from requests when absent.
    api_key: Option<Secret<String>>,
    /// Provider label reported in `provider_info`.
    pub provider_name: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Model, sampling parameters and timeout.
    pub parameters: GenerationParameters,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given generation parameters.
    pub fn new(parameters: GenerationParameters) -> Self {
        Self {
            api_key: None,
            provider_name: "openai-compatible".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            parameters,
        }
    }

    /// Builds provider configuration from the loaded `llm` section.
    pub fn from_llm_config(llm: &LlmConfig) -> Self {
        let parameters = GenerationParameters::new(llm.model.clone())
            .with_max_tokens(llm.parameters.max_tokens)
            .with_temperature(llm.parameters.temperature)
            .with_top_p(llm.parameters.top_p)
            .with_timeout(llm.parameters.timeout());

        let config = Self::new(parameters)
            .with_provider_name(llm.provider.clone())
            .with_base_url(llm.api_base.clone());

        match llm.api_key.as_deref() {
            Some(key) if !key.is_empty() => config.with_api_key(key),
            _ => config,
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the provider label.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Sets the base URL. A trailing slash is ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// OpenAI-compatible API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    ///
    /// The configured timeout bounds the whole request, body included.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.parameters.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let params = &self.config.parameters;
        let messages = request
            .messages()
            .into_iter()
            .map(|msg| OpenAIMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                }
                .to_string(),
                content: Some(msg.content),
            })
            .collect();

        OpenAIRequest {
            model: params.model.clone(),
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        let mut builder = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json");
        if let Some(key) = self.config.api_key() {
            builder = builder.bearer_auth(key);
        }

        builder
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.config.parameters.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::RateLimited),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses a completion response.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport_error(e)
            } else {
                AIError::parse(format!("Failed to parse response: {}", e))
            }
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| AIError::parse("Top choice has no content"))?;

        Ok(CompletionResponse {
            content,
            model: openai_response
                .model
                .unwrap_or_else(|| self.config.parameters.model.clone()),
        })
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        tracing::debug!(
            trace_id = %request.metadata.trace_id,
            model = %self.config.parameters.model,
            "Sending chat completion request"
        );

        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(&self.config.provider_name, &self.config.parameters.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: Option<String>,
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmParameters;
    use crate::ports::RequestMetadata;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// What the fake upstream should do with each request.
    #[derive(Clone)]
    enum Upstream {
        Reply(StatusCode, Value),
        Hang(Duration),
    }

    #[derive(Clone)]
    struct FakeState {
        behaviour: Upstream,
        seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn fake_completions(
        State(state): State<FakeState>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        state.seen.lock().unwrap().push((auth, body));

        match state.behaviour {
            Upstream::Reply(status, body) => (status, Json(body)),
            Upstream::Hang(delay) => {
                tokio::time::sleep(delay).await;
                (StatusCode::OK, Json(json!({})))
            }
        }
    }

    /// Starts a local chat-completions server and returns its base URL.
    async fn spawn_upstream(behaviour: Upstream) -> (String, FakeState) {
        let state = FakeState {
            behaviour,
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(fake_completions))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/v1", addr), state)
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("system role", "user prompt", RequestMetadata::new("trace-1"))
    }

    fn provider(base_url: &str, timeout: Duration) -> OpenAIProvider {
        let params = GenerationParameters::new("test-model")
            .with_max_tokens(64)
            .with_temperature(0.5)
            .with_top_p(0.8)
            .with_timeout(timeout);
        OpenAIProvider::new(OpenAIConfig::new(params).with_base_url(base_url)).unwrap()
    }

    fn completion_body(content: &str) -> Value {
        json!({
            "id": "chatcmpl-123",
            "model": "test-model-0613",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
            ]
        })
    }

    #[test]
    fn config_from_llm_section() {
        let llm = LlmConfig {
            provider: "local".to_string(),
            api_base: "http://localhost:8080/v1/".to_string(),
            api_key: Some("sk-test".to_string()),
            model: "llama3".to_string(),
            parameters: LlmParameters {
                max_tokens: 128,
                temperature: 0.1,
                top_p: 0.5,
                timeout: 12,
            },
        };

        let config = OpenAIConfig::from_llm_config(&llm);

        assert_eq!(config.provider_name, "local");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.api_key(), Some("sk-test"));
        assert_eq!(config.parameters.model, "llama3");
        assert_eq!(config.parameters.max_tokens, 128);
        assert_eq!(config.parameters.timeout, Duration::from_secs(12));
    }

    #[test]
    fn empty_api_key_is_dropped() {
        let llm = LlmConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(OpenAIConfig::from_llm_config(&llm).api_key(), None);
    }

    #[test]
    fn provider_info_reports_name_and_model() {
        let config = OpenAIConfig::new(GenerationParameters::new("gpt-3.5-turbo"))
            .with_provider_name("openai-compatible");
        let provider = OpenAIProvider::new(config).unwrap();

        let info = provider.provider_info();
        assert_eq!(info.name, "openai-compatible");
        assert_eq!(info.model, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn complete_returns_top_choice_content() {
        let (base_url, state) =
            spawn_upstream(Upstream::Reply(StatusCode::OK, completion_body("{\"a\":1}"))).await;
        let provider = provider(&base_url, Duration::from_secs(5));

        let response = provider.complete(request()).await.unwrap();

        assert_eq!(response.content, "{\"a\":1}");
        assert_eq!(response.model, "test-model-0613");

        let seen = state.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (auth, body) = &seen[0];
        assert_eq!(auth, &None);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "system role");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user prompt");
        assert!(body.get("stream").is_none());
    }

    #[tokio::test]
    async fn complete_sends_bearer_token_when_configured() {
        let (base_url, state) =
            spawn_upstream(Upstream::Reply(StatusCode::OK, completion_body("ok"))).await;
        let config = OpenAIConfig::new(GenerationParameters::new("m"))
            .with_base_url(base_url)
            .with_api_key("sk-secret");
        let provider = OpenAIProvider::new(config).unwrap();

        provider.complete(request()).await.unwrap();

        let seen = state.seen.lock().unwrap();
        assert_eq!(seen[0].0.as_deref(), Some("Bearer sk-secret"));
    }

    #[tokio::test]
    async fn non_success_statuses_are_classified() {
        let cases = [
            (StatusCode::UNAUTHORIZED, "auth"),
            (StatusCode::TOO_MANY_REQUESTS, "rate"),
            (StatusCode::BAD_REQUEST, "invalid"),
            (StatusCode::BAD_GATEWAY, "unavailable"),
        ];

        for (status, kind) in cases {
            let (base_url, _) =
                spawn_upstream(Upstream::Reply(status, json!({"error": {"message": "nope"}})))
                    .await;
            let err = provider(&base_url, Duration::from_secs(5))
                .complete(request())
                .await
                .unwrap_err();

            let matched = match kind {
                "auth" => matches!(err, AIError::AuthenticationFailed),
                "rate" => matches!(err, AIError::RateLimited),
                "invalid" => matches!(err, AIError::InvalidRequest(_)),
                _ => matches!(err, AIError::Unavailable { .. }),
            };
            assert!(matched, "status {} produced {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn missing_choices_is_a_parse_error() {
        let (base_url, _) =
            spawn_upstream(Upstream::Reply(StatusCode::OK, json!({"choices": []}))).await;

        let err = provider(&base_url, Duration::from_secs(5))
            .complete(request())
            .await
            .unwrap_err();

        assert!(matches!(err, AIError::Parse(_)));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let (base_url, _) = spawn_upstream(Upstream::Hang(Duration::from_secs(10))).await;

        let started = std::time::Instant::now();
        let err = provider(&base_url, Duration::from_millis(200))
            .complete(request())
            .await
            .unwrap_err();

        assert!(err.is_timeout(), "expected timeout, got {:?}", err);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_network_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(&format!("http://{}/v1", addr), Duration::from_secs(5))
            .complete(request())
            .await
            .unwrap_err();

        assert!(matches!(err, AIError::Network(_)), "got {:?}", err);
    }
}
