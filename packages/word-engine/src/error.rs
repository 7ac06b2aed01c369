//! Typed errors for the word engine.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on what went wrong.

use thiserror::Error;

use crate::types::Tier;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The tier has no verified entries and no generative source is configured
    #[error("no entries available for tier '{tier}'")]
    EmptyTier { tier: Tier },

    /// The generative fallback could not produce a word
    #[error("word generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Cache backend failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// JSON encode/decode error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Failures of a generative word source.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No credentials configured for the provider
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// Request never reached the provider or the connection dropped
    #[error("network error: {0}")]
    Network(String),

    /// Provider answered with an error (bad request, server failure)
    #[error("provider error: {0}")]
    Provider(String),

    /// Provider refused the call for rate or quota reasons
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Output could not be turned into a vocabulary entry
    #[error("malformed output: {0}")]
    Malformed(String),

    /// Provider did not answer in time
    #[error("generation timed out")]
    Timeout,
}

/// Failures of an example enricher.
///
/// Never returned from engine operations; the engine logs these and
/// leaves the entry without an example.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("enrichment unavailable: {0}")]
    Unavailable(String),

    #[error("enrichment produced no usable sentence")]
    Empty,
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result type alias for generative sources.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Result type alias for enrichers.
pub type EnrichmentResult<T> = std::result::Result<T, EnrichmentError>;
