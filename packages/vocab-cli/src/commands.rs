//! Subcommand implementations.

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use word_engine::{
    AnswerFeedback, PracticeSession, Provenance, Tier, VocabularyEntry, WordFilter,
    WordSelectionEngine,
};

use crate::config::Config;
use crate::render::{
    badge_label, print_banner, print_entry, print_lexicon_entry, print_session_summary,
};
use crate::state::LearnerState;

fn tier_or_default(tier: Option<String>, config: &Config) -> Tier {
    tier.map(Tier::from)
        .unwrap_or_else(|| config.default_tier.clone())
}

/// Drive `work` to completion, cancelling `cancel` if `interrupt` fires
/// first. The interrupt listener lives only as long as the work.
async fn cancel_on<T>(
    work: impl Future<Output = T>,
    cancel: &CancellationToken,
    interrupt: impl Future,
) -> T {
    tokio::pin!(work);
    tokio::select! {
        output = &mut work => output,
        _ = interrupt => {
            cancel.cancel();
            work.await
        }
    }
}

/// Select a batch, record it in the word list and the cache.
///
/// Words already in the learner's list count as used, so a new run does
/// not hand them out again until the tier's cycle is complete.
async fn pick_batch(
    engine: &WordSelectionEngine,
    state: &mut LearnerState,
    tier: &Tier,
    count: usize,
    start_id: Option<u64>,
) -> Result<Vec<VocabularyEntry>> {
    engine.mark_seen(state.words.iter());

    let start_id = start_id.unwrap_or_else(|| state.words.next_id());
    let cancel = CancellationToken::new();
    let entries = cancel_on(
        engine.select_many_with_cancel(count, tier, start_id, cancel.clone()),
        &cancel,
        tokio::signal::ctrl_c(),
    )
    .await
    .context("Failed to pick words")?;

    engine.remember(&entries).await?;
    state.words.add_many(entries.iter().cloned());
    Ok(entries)
}

pub async fn pick(
    engine: &WordSelectionEngine,
    config: &Config,
    tier: Option<String>,
    count: usize,
    start_id: Option<u64>,
    json: bool,
) -> Result<()> {
    let tier = tier_or_default(tier, config);
    let mut state = LearnerState::load(&config.progress_path)?;
    let entries = pick_batch(engine, &mut state, &tier, count, start_id).await?;
    state.save(&config.progress_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No words available right now. Try again later.".yellow());
    }
    for entry in &entries {
        print_entry(entry);
        println!();
    }
    Ok(())
}

pub async fn next(
    engine: &WordSelectionEngine,
    config: &Config,
    tier: Option<String>,
    id: u64,
) -> Result<()> {
    let tier = tier_or_default(tier, config);
    let entry = engine.resolve_cached(&tier, id).await?;

    let mut state = LearnerState::load(&config.progress_path)?;
    if state.words.add(entry.clone()) {
        state.save(&config.progress_path)?;
    }

    print_entry(&entry);
    Ok(())
}

pub fn search(engine: &WordSelectionEngine, query: &str) -> Result<()> {
    let results = engine.search(query);
    if results.is_empty() {
        println!("{}", format!("No words match '{query}'").yellow());
        return Ok(());
    }

    println!("{} result(s)", results.len());
    for entry in results {
        print_lexicon_entry(entry);
    }
    Ok(())
}

pub fn stats(engine: &WordSelectionEngine, config: &Config) -> Result<()> {
    let counts = engine.counts_by_tier();
    println!("{}", "Lexicon".bold());
    for (tier, count) in &counts.by_tier {
        println!("  {:<14} {}", tier.as_str(), count);
    }
    println!("  {:<14} {}", "total", counts.total.to_string().bold());

    let state = LearnerState::load(&config.progress_path)?;
    let progress = &state.progress;
    println!();
    println!("{}", "Progress".bold());
    println!("  Words practiced: {}", progress.total_words_practiced);
    println!("  Points:          {} GH₵", progress.total_points);
    println!("  Sessions:        {}", progress.sessions_completed);
    println!("  Streak:          {} day(s)", progress.practice_streak);
    println!(
        "  Badge:           {} {}",
        progress.current_badge.icon(),
        badge_label(progress.current_badge)
    );
    if let Some(remaining) = progress.words_to_next_badge() {
        println!("  Next badge in:   {} word(s)", remaining);
    }
    println!("  Words seen:      {}", state.words.len());
    Ok(())
}

pub fn daily(engine: &WordSelectionEngine) -> Result<()> {
    let today = Local::now().date_naive();
    let entry = engine
        .lexicon()
        .daily_entry(today)
        .context("The lexicon is empty")?;

    println!("{} {}", "Word of the day".bold(), today.format("%A, %-d %B").to_string().dimmed());
    print_lexicon_entry(entry);
    Ok(())
}

pub async fn practice(
    engine: &WordSelectionEngine,
    config: &Config,
    tier: Option<String>,
    count: usize,
) -> Result<()> {
    let tier = tier_or_default(tier, config);
    let mut state = LearnerState::load(&config.progress_path)?;
    let entries = pick_batch(engine, &mut state, &tier, count, None).await?;

    if entries.is_empty() {
        println!("{}", "No words available in this tier".yellow());
        return Ok(());
    }

    let term = Term::stdout();
    term.clear_screen()?;
    print_banner(&format!("Practice Mode · {tier}"));
    println!("{}", "Type the English meaning. Leave blank to skip.".dimmed());

    let theme = ColorfulTheme::default();
    let mut session = PracticeSession::new(tier, entries);

    while let Some(entry) = session.current().cloned() {
        let (position, total) = session.progress();
        println!();
        println!(
            "{} {}  {}",
            format!("[{position}/{total}]").dimmed(),
            entry.term.bright_white().bold(),
            format!("[{}]", entry.pronunciation).cyan()
        );

        let answer: String = Input::with_theme(&theme)
            .with_prompt("Meaning")
            .allow_empty(true)
            .interact_text_on(&term)?;

        if answer.trim().is_empty() {
            if let Some(definition) = session.skip() {
                println!("{} It means: {}", "⏭️  Skipped!".yellow(), definition);
            }
        } else {
            match session.submit(&answer) {
                Some(AnswerFeedback::Correct { points }) => {
                    println!("{}", format!("✅ Correct! +{points} GH₵").green());
                }
                Some(AnswerFeedback::Incorrect { expected }) => {
                    println!("{} It means: {}", "❌ Wrong!".red(), expected);
                }
                None => {}
            }
        }

        if let Some(example) = &entry.example {
            println!("   {} {}", "e.g.".dimmed(), example.italic());
        }
        session.advance();
    }

    let stats = session.stats().clone();
    let outcome = state.progress.record_practice(&stats, Local::now().date_naive());
    state.save(&config.progress_path)?;

    print_session_summary(&stats, &outcome);
    Ok(())
}

pub fn history(config: &Config, tier: Option<String>, generated: bool) -> Result<()> {
    let state = LearnerState::load(&config.progress_path)?;

    let mut filter = WordFilter::new();
    filter.tier = tier.map(Tier::from);
    if generated {
        filter = filter.with_provenance(Provenance::Generated);
    }

    let words = state.words.get_all(&filter);
    if words.is_empty() {
        println!("{}", "No words yet. Run `twi pick` to get started.".yellow());
        return Ok(());
    }
    for entry in words {
        print_entry(entry);
    }
    Ok(())
}

pub async fn cache_get(engine: &WordSelectionEngine, id: u64) -> Result<()> {
    match engine.cached(id).await? {
        Some(entry) => print_entry(&entry),
        None => println!("{}", format!("Nothing cached under id {id}").yellow()),
    }
    Ok(())
}

pub async fn cache_clear(engine: &WordSelectionEngine) -> Result<()> {
    engine.clear_cache().await?;
    println!("{}", "Word cache cleared".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_engine::testing::MockWordSource;
    use word_engine::{EngineError, VerifiedLexicon};

    fn config(dir: &std::path::Path) -> Config {
        let mut config = Config::from_vars(|_| None).unwrap();
        config.cache_path = dir.join("cache.json");
        config.progress_path = dir.join("progress.json");
        config
    }

    #[tokio::test]
    async fn test_pick_batch_continues_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
            .cache(word_engine::JsonFileCache::new(&config.cache_path))
            .build();
        let mut state = LearnerState::default();

        let first = pick_batch(&engine, &mut state, &Tier::easy(), 3, None).await.unwrap();
        let second = pick_batch(&engine, &mut state, &Tier::easy(), 2, None).await.unwrap();

        assert_eq!(first.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(second.iter().map(|e| e.id).collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(state.words.len(), 5);
        assert!(engine.cached(5).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_pick_batch_skips_words_from_earlier_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut state = LearnerState::default();

        let earlier = WordSelectionEngine::builder(VerifiedLexicon::twi()).seed(1).build();
        let first = pick_batch(&earlier, &mut state, &Tier::easy(), 9, None).await.unwrap();

        let total = VerifiedLexicon::twi().entries_for_tier(&Tier::easy()).len();
        let engine = WordSelectionEngine::builder(VerifiedLexicon::twi())
            .cache(word_engine::JsonFileCache::new(&config.cache_path))
            .seed(2)
            .build();
        let second = pick_batch(&engine, &mut state, &Tier::easy(), total - 9, None)
            .await
            .unwrap();

        assert!(second.iter().all(|e| first.iter().all(|f| f.term != e.term)));
        assert_eq!(second[0].id, 10);
    }

    #[tokio::test]
    async fn test_interrupt_cancels_work() {
        let lexicon = VerifiedLexicon::builder().empty_tier("sentence").build();
        let engine = WordSelectionEngine::builder(lexicon)
            .generative_source(
                MockWordSource::new().with_delay(std::time::Duration::from_millis(50)),
            )
            .build();

        let cancel = CancellationToken::new();
        let result = cancel_on(
            engine.select_many_with_cancel(5, &Tier::new("sentence"), 1, cancel.clone()),
            &cancel,
            std::future::ready(()),
        )
        .await;

        assert!(matches!(result, Err(EngineError::Cancelled)));
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_work_finishing_first_is_not_cancelled() {
        let cancel = CancellationToken::new();
        let output = cancel_on(async { 7 }, &cancel, std::future::pending::<()>()).await;

        assert_eq!(output, 7);
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn test_tier_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        assert_eq!(tier_or_default(None, &config), Tier::intermediate());
        assert_eq!(tier_or_default(Some("EASY".into()), &config), Tier::easy());
    }
}
