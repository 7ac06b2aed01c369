//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::entry::Tier;

/// Configuration for the word selection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tier used when a caller asks for a tier the lexicon does not declare.
    ///
    /// Default: `intermediate`.
    pub default_tier: Tier,

    /// Upper bound on a single enrichment call, in milliseconds.
    ///
    /// An enrichment that runs longer is abandoned and the entry is
    /// returned without an example. Default: 8000.
    pub enrichment_timeout_ms: u64,

    /// Attempt to attach examples to entries that lack one.
    ///
    /// Default: true.
    pub enrich_examples: bool,

    /// Run the enrichment calls of one batch concurrently.
    ///
    /// Result order is unchanged. Default: false (sequential, gentler on
    /// shared provider quotas).
    pub parallel_enrichment: bool,

    /// First id handed out by `select_one`.
    ///
    /// Default: 1.
    pub first_id: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_tier: Tier::intermediate(),
            enrichment_timeout_ms: 8_000,
            enrich_examples: true,
            parallel_enrichment: false,
            first_id: 1,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_tier(mut self, tier: impl Into<Tier>) -> Self {
        self.default_tier = tier.into();
        self
    }

    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_enrichment(mut self, enabled: bool) -> Self {
        self.enrich_examples = enabled;
        self
    }

    pub fn with_parallel_enrichment(mut self, parallel: bool) -> Self {
        self.parallel_enrichment = parallel;
        self
    }

    pub fn with_first_id(mut self, id: u64) -> Self {
        self.first_id = id;
        self
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_millis(self.enrichment_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let config = EngineConfig::new()
            .with_default_tier("Easy")
            .with_enrichment_timeout(Duration::from_millis(250))
            .with_parallel_enrichment(true)
            .with_first_id(100);

        assert_eq!(config.default_tier, Tier::easy());
        assert_eq!(config.enrichment_timeout(), Duration::from_millis(250));
        assert!(config.parallel_enrichment);
        assert!(config.enrich_examples);
        assert_eq!(config.first_id, 100);
    }

    #[test]
    fn test_deserializes_from_json() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"default_tier":"difficult","enrichment_timeout_ms":500,"enrich_examples":false,"parallel_enrichment":false,"first_id":1}"#,
        )
        .unwrap();

        assert_eq!(config.default_tier, Tier::difficult());
        assert!(!config.enrich_examples);
    }
}
