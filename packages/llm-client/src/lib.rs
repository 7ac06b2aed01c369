//! Provider-agnostic text generation client.
//!
//! One [`LlmClient`] talks to exactly one hosted provider (OpenAI,
//! Anthropic, or Google Gemini), chosen when the client is built. Callers
//! see a single-turn API regardless of the backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{CompletionRequest, LlmClient};
//!
//! let client = LlmClient::from_env()?;
//!
//! // Free text
//! let sentence = client
//!     .complete(CompletionRequest::new("Write one short sentence in Twi."))
//!     .await?;
//!
//! // Typed output, schema derived from the type
//! #[derive(Deserialize, JsonSchema)]
//! struct Word { word: String, definition: String }
//!
//! let word: Word = client
//!     .extract(CompletionRequest::new("Give me a common Twi word."))
//!     .await?;
//! ```

pub mod error;
pub mod provider;
pub mod schema;
pub mod types;

pub use error::{LlmError, Result};
pub use provider::Provider;
pub use schema::{extract_json_object, StructuredOutput};
pub use types::{CompletionRequest, Message};

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use types::{
    AnthropicRequest, AnthropicResponse, GeminiRequest, GeminiResponse, OpenAIChatRequest,
    OpenAIChatResponse, ResponseFormat,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Upper bound on one provider round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Text generation client bound to one provider.
#[derive(Clone)]
pub struct LlmClient {
    http_client: Client,
    provider: Provider,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl LlmClient {
    /// Create a client for `provider` using its default model and endpoint.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            http_client: http_client(DEFAULT_TIMEOUT),
            provider,
            api_key: api_key.into(),
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variables.
    ///
    /// `LLM_PROVIDER` selects the backend (default `openai`), the matching
    /// key variable (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `GOOGLE_API_KEY`)
    /// must be set, and `LLM_MODEL` optionally overrides the model.
    pub fn from_env() -> Result<Self> {
        let provider: Provider = match std::env::var("LLM_PROVIDER") {
            Ok(name) => name.parse()?,
            Err(_) => Provider::default(),
        };

        let key_var = provider.api_key_var();
        let api_key = std::env::var(key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::Config(format!("{key_var} not set for provider {provider}")))?;

        let mut client = Self::new(provider, api_key);
        if let Ok(model) = std::env::var("LLM_MODEL") {
            client = client.with_model(model);
        }
        Ok(client)
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (proxies, self-hosted gateways, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_client = http_client(timeout);
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate free text for a single prompt.
    pub async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let start = std::time::Instant::now();

        let text = match self.provider {
            Provider::OpenAI => {
                let body = OpenAIChatRequest::from_request(&self.model, &request);
                self.send_openai(body).await?
            }
            Provider::Anthropic => self.send_anthropic(&request).await?,
            Provider::Gemini => self.send_gemini(&request).await?,
        };

        debug!(
            provider = %self.provider,
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "LLM completion"
        );

        Ok(text)
    }

    /// Typed structured output.
    ///
    /// OpenAI receives the schema as a strict `json_schema` response format.
    /// Other providers get the schema appended to the prompt and their reply
    /// is narrowed to the first JSON object before deserializing.
    pub async fn extract<T: StructuredOutput>(&self, request: CompletionRequest) -> Result<T> {
        let schema = T::strict_schema();

        let raw = if self.provider.supports_json_schema() {
            let mut body = OpenAIChatRequest::from_request(&self.model, &request);
            body.response_format = Some(ResponseFormat::json_schema(T::output_name(), schema));
            self.send_openai(body).await?
        } else {
            let schema_text = serde_json::to_string(&schema)
                .map_err(|e| LlmError::Parse(format!("Failed to serialize schema: {e}")))?;
            let prompt = format!(
                "{}\n\nReturn ONLY valid JSON matching this schema, no other text:\n{}",
                request.prompt, schema_text
            );
            self.complete(CompletionRequest { prompt, ..request }).await?
        };

        parse_structured(&raw)
    }

    async fn send_openai(&self, body: OpenAIChatRequest) -> Result<String> {
        let request = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: OpenAIChatResponse = self.send(request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Parse("No content in OpenAI response".into()))
    }

    async fn send_anthropic(&self, request: &CompletionRequest) -> Result<String> {
        let body = AnthropicRequest::from_request(&self.model, request);
        let request = self
            .http_client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: AnthropicResponse = self.send(request).await?;
        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(LlmError::Parse("No text in Anthropic response".into()));
        }
        Ok(text)
    }

    async fn send_gemini(&self, request: &CompletionRequest) -> Result<String> {
        let body = GeminiRequest::from_request(request);
        let request = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body);

        let response: GeminiResponse = self.send(request).await?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| LlmError::Parse("No candidates in Gemini response".into()))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response: Response = request.send().await.map_err(|e| {
            warn!(provider = %self.provider, error = %e, "LLM request failed");
            self.transport_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(provider = %self.provider, status = %status, error = %message, "LLM API error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout)
            } else {
                LlmError::Parse(e.to_string())
            }
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Deserialize a model reply that should contain one JSON object.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let json = extract_json_object(raw)
        .ok_or_else(|| LlmError::Parse("Could not find a JSON object in response".into()))?;
    serde_json::from_str(json)
        .map_err(|e| LlmError::Parse(format!("Failed to deserialize response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_client_builder() {
        let client = LlmClient::new(Provider::Anthropic, "sk-test")
            .with_model("claude-3-5-haiku-latest")
            .with_base_url("https://proxy.local/v1");

        assert_eq!(client.provider(), Provider::Anthropic);
        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.model(), "claude-3-5-haiku-latest");
        assert_eq!(client.base_url(), "https://proxy.local/v1");
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts connections but never answers.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = LlmClient::new(Provider::OpenAI, "sk-test")
            .with_base_url(format!("http://{addr}/v1"))
            .with_timeout(Duration::from_millis(200));

        let err = client
            .complete(CompletionRequest::new("Akwaaba"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(t) if t == Duration::from_millis(200)));
        drop(listener);
    }

    #[test]
    fn test_new_uses_provider_defaults() {
        let client = LlmClient::new(Provider::Gemini, "key");
        assert_eq!(client.model(), "gemini-1.5-flash");
        assert!(client.base_url().starts_with("https://generativelanguage"));
    }

    #[derive(Debug, Deserialize)]
    struct Word {
        word: String,
    }

    #[test]
    fn test_parse_structured_from_chatty_reply() {
        let word: Word = parse_structured("Here you go: {\"word\": \"Aduane\"}").unwrap();
        assert_eq!(word.word, "Aduane");
    }

    #[test]
    fn test_parse_structured_errors() {
        assert!(matches!(
            parse_structured::<Word>("nothing useful"),
            Err(LlmError::Parse(_))
        ));
        assert!(matches!(
            parse_structured::<Word>("{\"other\": 1}"),
            Err(LlmError::Parse(_))
        ));
    }

    #[test]
    fn test_rate_limit_detection() {
        let err = LlmError::Api {
            status: 429,
            message: "slow down".into(),
        };
        assert!(err.is_rate_limited());
        assert!(!LlmError::Network("reset".into()).is_rate_limited());
    }
}
