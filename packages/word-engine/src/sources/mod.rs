//! Generative source and enricher implementations.
//!
//! Available:
//! - `RateLimited` - Quota wrapper for any source or enricher
//! - `LlmWordSource`, `LlmExampleEnricher` - Hosted LLM backends (requires `llm` feature)

pub mod prompts;
pub mod rate_limited;

#[cfg(feature = "llm")]
pub mod llm;

pub use rate_limited::RateLimited;

#[cfg(feature = "llm")]
pub use llm::{LlmExampleEnricher, LlmWordSource};
