//! The verified lexicon: immutable, tier-partitioned curated vocabulary.
//!
//! All operations are pure reads. Tier order and entry order are the
//! declaration order, which gives the selection tracker a stable index
//! space per tier.

mod twi;

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;

use crate::types::{LexiconEntry, Tier};

/// Per-tier entry counts plus the overall total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub by_tier: IndexMap<Tier, usize>,
    pub total: usize,
}

impl TierCounts {
    pub fn get(&self, tier: &Tier) -> usize {
        self.by_tier.get(tier).copied().unwrap_or(0)
    }
}

/// Curated, trusted vocabulary partitioned by tier.
#[derive(Debug, Clone, Default)]
pub struct VerifiedLexicon {
    tiers: IndexMap<Tier, Vec<LexiconEntry>>,
}

impl VerifiedLexicon {
    /// Start an empty lexicon declaration.
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// The built-in Twi lexicon (`easy`, `intermediate`, `difficult`).
    pub fn twi() -> Self {
        Self::builder()
            .tier_from_rows(Tier::easy(), twi::EASY)
            .tier_from_rows(Tier::intermediate(), twi::INTERMEDIATE)
            .tier_from_rows(Tier::difficult(), twi::DIFFICULT)
            .build()
    }

    /// Declared tiers, in order.
    pub fn tiers(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.keys()
    }

    pub fn contains_tier(&self, tier: &Tier) -> bool {
        self.tiers.contains_key(tier)
    }

    /// Position of `tier` in the declared order (lower is easier).
    pub fn tier_rank(&self, tier: &Tier) -> Option<usize> {
        self.tiers.get_index_of(tier)
    }

    /// `tier` if declared, otherwise `default`.
    pub fn resolve_tier(&self, tier: &Tier, default: &Tier) -> Tier {
        if self.contains_tier(tier) {
            tier.clone()
        } else {
            default.clone()
        }
    }

    /// Entries for a tier in declaration order. Empty for unknown tiers.
    pub fn entries_for_tier(&self, tier: &Tier) -> &[LexiconEntry] {
        self.tiers.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every entry, tier by tier.
    pub fn all_entries(&self) -> impl Iterator<Item = &LexiconEntry> {
        self.tiers.values().flatten()
    }

    /// Entries whose term or definition contains `query`, ignoring case.
    ///
    /// No ranking: results keep lexicon order.
    pub fn search(&self, query: &str) -> Vec<&LexiconEntry> {
        let needle = query.trim().to_lowercase();
        self.all_entries().filter(|e| e.matches(&needle)).collect()
    }

    pub fn counts_by_tier(&self) -> TierCounts {
        let by_tier: IndexMap<Tier, usize> = self
            .tiers
            .iter()
            .map(|(tier, entries)| (tier.clone(), entries.len()))
            .collect();
        let total = by_tier.values().sum();
        TierCounts { by_tier, total }
    }

    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The word of the day: stable for a calendar date, cycling through
    /// the whole lexicon over the year.
    pub fn daily_entry(&self, date: NaiveDate) -> Option<&LexiconEntry> {
        let total = self.len();
        if total == 0 {
            return None;
        }
        self.all_entries().nth(date.ordinal() as usize % total)
    }

    pub fn entries_by_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a LexiconEntry> {
        self.all_entries()
            .filter(move |e| e.region.eq_ignore_ascii_case(region))
    }
}

/// Declares tiers and their entries.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    tiers: IndexMap<Tier, Vec<LexiconEntry>>,
}

impl LexiconBuilder {
    /// Declare a tier with entries. Each entry's tier is overwritten with
    /// `tier` so the partition cannot disagree with the records.
    pub fn tier(mut self, tier: impl Into<Tier>, entries: Vec<LexiconEntry>) -> Self {
        let tier = tier.into();
        let entries = entries
            .into_iter()
            .map(|mut e| {
                e.tier = tier.clone();
                e
            })
            .collect::<Vec<_>>();
        self.tiers.entry(tier).or_default().extend(entries);
        self
    }

    /// Declare a tier with no verified entries. Requests for it go to the
    /// generative source, if one is configured.
    pub fn empty_tier(mut self, tier: impl Into<Tier>) -> Self {
        self.tiers.entry(tier.into()).or_default();
        self
    }

    fn tier_from_rows(self, tier: Tier, rows: &[(&str, &str, &str)]) -> Self {
        let entries = rows
            .iter()
            .map(|(term, pron, def)| LexiconEntry::new(*term, *pron, *def, tier.clone()))
            .collect();
        self.tier(tier, entries)
    }

    pub fn build(self) -> VerifiedLexicon {
        VerifiedLexicon { tiers: self.tiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twi_counts() {
        let lexicon = VerifiedLexicon::twi();
        let counts = lexicon.counts_by_tier();

        assert_eq!(counts.get(&Tier::easy()), 18);
        assert_eq!(counts.get(&Tier::intermediate()), 23);
        assert_eq!(counts.get(&Tier::difficult()), 26);
        assert_eq!(counts.total, 67);
        assert_eq!(counts.get(&Tier::new("sentence")), 0);
    }

    #[test]
    fn test_tier_order_is_declaration_order() {
        let lexicon = VerifiedLexicon::twi();
        let tiers: Vec<_> = lexicon.tiers().map(Tier::as_str).collect();
        assert_eq!(tiers, vec!["easy", "intermediate", "difficult"]);
        assert!(lexicon.tier_rank(&Tier::easy()) < lexicon.tier_rank(&Tier::difficult()));
    }

    #[test]
    fn test_entries_for_tier_keeps_order() {
        let lexicon = VerifiedLexicon::twi();
        let easy = lexicon.entries_for_tier(&Tier::easy());
        assert_eq!(easy.first().map(|e| e.term.as_str()), Some("Me"));
        assert_eq!(easy.last().map(|e| e.term.as_str()), Some("Aburow"));
        assert!(lexicon.entries_for_tier(&Tier::new("unknown")).is_empty());
    }

    #[test]
    fn test_search_love() {
        let lexicon = VerifiedLexicon::twi();
        let terms: Vec<_> = lexicon.search("LOVE").iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["Odɔ", "Me dɔ wo", "Ɔdɔ"]);
    }

    #[test]
    fn test_search_matches_term_too() {
        let lexicon = VerifiedLexicon::twi();
        let results = lexicon.search("akwaaba");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].definition, "Welcome");
    }

    #[test]
    fn test_resolve_unknown_tier_to_default() {
        let lexicon = VerifiedLexicon::twi();
        let default = Tier::intermediate();
        assert_eq!(lexicon.resolve_tier(&Tier::new("expert"), &default), default);
        assert_eq!(lexicon.resolve_tier(&Tier::easy(), &default), Tier::easy());
    }

    #[test]
    fn test_builder_forces_entry_tier() {
        let lexicon = VerifiedLexicon::builder()
            .tier("basic", vec![LexiconEntry::new("Nsa", "n-sah", "Water", Tier::difficult())])
            .empty_tier("sentence")
            .build();

        assert_eq!(lexicon.entries_for_tier(&Tier::new("basic"))[0].tier, Tier::new("basic"));
        assert!(lexicon.contains_tier(&Tier::new("sentence")));
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_daily_entry_is_stable_per_day() {
        let lexicon = VerifiedLexicon::twi();
        let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let next = day.succ_opt().unwrap();

        assert_eq!(lexicon.daily_entry(day), lexicon.daily_entry(day));
        assert_ne!(lexicon.daily_entry(day), lexicon.daily_entry(next));
        assert!(VerifiedLexicon::default().daily_entry(day).is_none());
    }

    #[test]
    fn test_entries_by_region() {
        let lexicon = VerifiedLexicon::twi();
        assert_eq!(lexicon.entries_by_region("twi").count(), 67);
        assert_eq!(lexicon.entries_by_region("Fante").count(), 0);
    }
}
