//! Hosted LLM implementations of the generative source and the enricher.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::LlmClient;
//! use word_engine::sources::{LlmExampleEnricher, LlmWordSource};
//!
//! let client = LlmClient::from_env()?;
//! let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
//!     .generative_source(LlmWordSource::new(client.clone()))
//!     .enricher(LlmExampleEnricher::new(client))
//!     .build();
//! ```

use async_trait::async_trait;
use llm_client::{CompletionRequest, LlmClient, LlmError};
use tracing::debug;

use super::prompts::{build_example_prompt, build_generate_prompt, clean_sentence, SYSTEM_PROMPT};
use crate::error::{
    EnrichmentError, EnrichmentResult, GenerationError, GenerationResult,
};
use crate::traits::{enricher::ExampleEnricher, source::GenerativeWordSource};
use crate::types::{GeneratedWord, Tier, VocabularyEntry};

/// Generates words through a hosted model.
#[derive(Clone)]
pub struct LlmWordSource {
    client: LlmClient,
    temperature: f32,
    max_tokens: u32,
}

impl LlmWordSource {
    pub fn new(client: LlmClient) -> Self {
        Self {
            client,
            temperature: 0.7,
            max_tokens: 300,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl GenerativeWordSource for LlmWordSource {
    async fn generate(&self, tier: &Tier) -> GenerationResult<GeneratedWord> {
        let request = CompletionRequest::new(build_generate_prompt(tier))
            .system(SYSTEM_PROMPT)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens);

        let word: GeneratedWord = self
            .client
            .extract(request)
            .await
            .map_err(generation_error)?;

        debug!(tier = %tier, word = %word.word, provider = %self.client.provider(), "Generated word");
        word.validate()
    }

    fn name(&self) -> &str {
        "llm"
    }
}

/// Writes example sentences through a hosted model.
#[derive(Clone)]
pub struct LlmExampleEnricher {
    client: LlmClient,
}

impl LlmExampleEnricher {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExampleEnricher for LlmExampleEnricher {
    async fn enrich(&self, entry: &VocabularyEntry) -> EnrichmentResult<String> {
        let request = CompletionRequest::new(build_example_prompt(entry))
            .system(SYSTEM_PROMPT)
            .temperature(0.7)
            .max_tokens(120);

        let reply = self
            .client
            .complete(request)
            .await
            .map_err(|e| EnrichmentError::Unavailable(e.to_string()))?;

        clean_sentence(&reply).ok_or(EnrichmentError::Empty)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

/// Map client failures onto the engine's generation error kinds.
pub(crate) fn generation_error(err: LlmError) -> GenerationError {
    if err.is_rate_limited() {
        return GenerationError::RateLimited(err.to_string());
    }
    match err {
        LlmError::Config(msg) => GenerationError::MissingCredentials(msg),
        LlmError::Network(msg) => GenerationError::Network(msg),
        LlmError::Timeout(_) => GenerationError::Timeout,
        LlmError::Api { status, message } => {
            GenerationError::Provider(format!("status {status}: {message}"))
        }
        LlmError::Parse(msg) => GenerationError::Malformed(msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let limited = LlmError::Api {
            status: 429,
            message: "quota".into(),
        };
        assert!(matches!(generation_error(limited), GenerationError::RateLimited(_)));

        let server = LlmError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert!(matches!(generation_error(server), GenerationError::Provider(m) if m.contains("500")));

        assert!(matches!(
            generation_error(LlmError::Config("OPENAI_API_KEY not set".into())),
            GenerationError::MissingCredentials(_)
        ));
        assert!(matches!(
            generation_error(LlmError::Parse("no json".into())),
            GenerationError::Malformed(_)
        ));
        assert!(matches!(
            generation_error(LlmError::Timeout(std::time::Duration::from_secs(30))),
            GenerationError::Timeout
        ));
    }

    #[test]
    fn test_generated_word_schema_is_strict() {
        use llm_client::StructuredOutput;

        let schema = GeneratedWord::strict_schema();
        assert_eq!(schema["additionalProperties"], false);
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|r| r == "word"));
        assert!(required.iter().any(|r| r == "example"));
    }

    #[tokio::test]
    async fn test_silent_provider_is_timeout() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let client = LlmClient::new(llm_client::Provider::OpenAI, "sk-test")
            .with_base_url(format!("http://{}/v1", listener.local_addr().unwrap()))
            .with_timeout(std::time::Duration::from_millis(200));
        let source = LlmWordSource::new(client);

        let err = source.generate(&Tier::easy()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_network_error() {
        let client = LlmClient::new(llm_client::Provider::OpenAI, "sk-test")
            .with_base_url("http://127.0.0.1:9");
        let source = LlmWordSource::new(client);

        let err = source.generate(&Tier::easy()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Network(_)));
    }
}
