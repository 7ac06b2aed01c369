//! `twi` - learn Twi vocabulary from the terminal.

mod commands;
mod config;
mod render;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use llm_client::LlmClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use word_engine::{
    JsonFileCache, LlmExampleEnricher, LlmWordSource, RateLimited, VerifiedLexicon,
    WordSelectionEngine,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "twi")]
#[command(about = "Learn Twi (Akan) vocabulary one word at a time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick new words and add them to your word list
    Pick {
        /// easy, intermediate or difficult
        #[arg(long)]
        tier: Option<String>,
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// First id to assign (defaults to the next free id)
        #[arg(long)]
        start_id: Option<u64>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the word stored under an id, picking one if it is not cached
    Next {
        #[arg(long)]
        tier: Option<String>,
        #[arg(long)]
        id: u64,
    },

    /// Search the curated lexicon by Twi term or English meaning
    Search { query: String },

    /// Lexicon size per tier and your progress
    Stats,

    /// Word of the day
    Daily,

    /// Quiz yourself on fresh words
    Practice {
        #[arg(long)]
        tier: Option<String>,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },

    /// Words you have been shown
    History {
        #[arg(long)]
        tier: Option<String>,
        /// Only generated (unverified) words
        #[arg(long)]
        generated: bool,
    },

    /// Inspect or clear the word cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print a cached entry
    Get { id: u64 },
    /// Remove every cached entry
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,word_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let engine = build_engine(&config)?;

    match cli.command {
        Commands::Pick {
            tier,
            count,
            start_id,
            json,
        } => commands::pick(&engine, &config, tier, count, start_id, json).await,
        Commands::Next { tier, id } => commands::next(&engine, &config, tier, id).await,
        Commands::Search { query } => commands::search(&engine, &query),
        Commands::Stats => commands::stats(&engine, &config),
        Commands::Daily => commands::daily(&engine),
        Commands::Practice { tier, count } => {
            commands::practice(&engine, &config, tier, count).await
        }
        Commands::History { tier, generated } => commands::history(&config, tier, generated),
        Commands::Cache { action } => match action {
            CacheAction::Get { id } => commands::cache_get(&engine, id).await,
            CacheAction::Clear => commands::cache_clear(&engine).await,
        },
    }
}

/// Compose the engine. The hosted provider is wired in only when its API
/// key is configured; without it the curated lexicon still works.
fn build_engine(config: &Config) -> Result<WordSelectionEngine> {
    let builder = WordSelectionEngine::builder(VerifiedLexicon::twi())
        .config(config.engine_config())
        .cache(JsonFileCache::new(&config.cache_path));

    let builder = match LlmClient::from_env() {
        Ok(client) => {
            let client = client.with_timeout(config.llm_timeout());
            tracing::info!(provider = %client.provider(), model = client.model(), "LLM provider configured");
            let rpm = config.llm_requests_per_minute;
            builder
                .generative_source(RateLimited::per_minute(LlmWordSource::new(client.clone()), rpm)?)
                .enricher(RateLimited::per_minute(LlmExampleEnricher::new(client), rpm)?)
        }
        Err(e) => {
            tracing::info!(reason = %e, "No LLM provider, examples and generation disabled");
            builder
        }
    };

    Ok(builder.build())
}
