use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use word_engine::{EngineConfig, Tier};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub cache_path: PathBuf,
    pub progress_path: PathBuf,
    pub default_tier: Tier,
    pub enrichment_timeout_ms: u64,
    pub enrich_examples: bool,
    pub parallel_enrichment: bool,
    pub llm_requests_per_minute: u32,
    pub llm_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build from any variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            cache_path: var("WORD_CACHE_PATH")
                .unwrap_or_else(|| ".twi-cache.json".to_string())
                .into(),
            progress_path: var("PROGRESS_PATH")
                .unwrap_or_else(|| ".twi-progress.json".to_string())
                .into(),
            default_tier: var("DEFAULT_TIER")
                .map(Tier::from)
                .unwrap_or_else(Tier::intermediate),
            enrichment_timeout_ms: var("ENRICHMENT_TIMEOUT_MS")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("ENRICHMENT_TIMEOUT_MS must be a valid number")?,
            enrich_examples: flag(var("ENRICH_EXAMPLES"), true)
                .context("ENRICH_EXAMPLES must be true or false")?,
            parallel_enrichment: flag(var("PARALLEL_ENRICHMENT"), false)
                .context("PARALLEL_ENRICHMENT must be true or false")?,
            llm_requests_per_minute: var("LLM_REQUESTS_PER_MINUTE")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("LLM_REQUESTS_PER_MINUTE must be a valid number")?,
            llm_timeout_secs: var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("LLM_TIMEOUT_SECS must be a valid number")?,
        })
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_default_tier(self.default_tier.clone())
            .with_enrichment_timeout(Duration::from_millis(self.enrichment_timeout_ms))
            .with_enrichment(self.enrich_examples)
            .with_parallel_enrichment(self.parallel_enrichment)
    }
}

fn flag(value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized flag value '{other}'"),
    }
}
