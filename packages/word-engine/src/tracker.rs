//! Per-tier non-repetition bookkeeping.
//!
//! Each tier cycles through its index space: indices are dispensed
//! uniformly at random among those not yet used, and once the last one is
//! dispensed the tier's used set is cleared so the next request starts a
//! fresh cycle. Cycles are independent per tier.

use std::collections::{HashMap, HashSet};

use crate::error::{EngineError, Result};
use crate::types::Tier;

/// Where a tier is in its current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierState {
    /// Nothing dispensed yet
    Fresh,
    /// Some dispensed, some remain
    Partial,
    /// Everything dispensed; the next pick resets the cycle
    Exhausted,
}

/// Tracks which lexicon indices each tier has already handed out.
#[derive(Debug)]
pub struct SelectionTracker {
    used: HashMap<Tier, HashSet<usize>>,
    rng: fastrand::Rng,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self {
            used: HashMap::new(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic tracker for tests and reproducible sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            used: HashMap::new(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Dispense one index in `0..available` not used in the current cycle.
    pub fn pick_index(&mut self, tier: &Tier, available: usize) -> Result<usize> {
        let mut picked = self.pick_distinct(tier, available, 1)?;
        picked.pop().ok_or_else(|| EngineError::EmptyTier { tier: tier.clone() })
    }

    /// Dispense up to `count` distinct indices in one call.
    ///
    /// Returns `min(count, available)` indices with no repeats among them.
    /// If the cycle runs out part-way, the tier is reset and drawing
    /// continues from the fresh cycle, still excluding what this call has
    /// already returned.
    pub fn pick_distinct(
        &mut self,
        tier: &Tier,
        available: usize,
        count: usize,
    ) -> Result<Vec<usize>> {
        if available == 0 {
            return Err(EngineError::EmptyTier { tier: tier.clone() });
        }

        let wanted = count.min(available);
        let mut drawn: Vec<usize> = Vec::with_capacity(wanted);
        let used = self.used.entry(tier.clone()).or_default();

        // A shrunken lexicon can leave stale indices behind.
        used.retain(|&i| i < available);

        while drawn.len() < wanted {
            if used.len() >= available {
                used.clear();
            }

            let candidates: Vec<usize> = (0..available)
                .filter(|i| !used.contains(i) && !drawn.contains(i))
                .collect();

            if candidates.is_empty() {
                // Only this call's own picks remain unused; start a new cycle.
                used.clear();
                continue;
            }

            let index = candidates[self.rng.usize(..candidates.len())];
            used.insert(index);
            drawn.push(index);

            if used.len() >= available {
                used.clear();
            }
        }

        Ok(drawn)
    }

    pub fn used_count(&self, tier: &Tier) -> usize {
        self.used.get(tier).map_or(0, HashSet::len)
    }

    pub fn state(&self, tier: &Tier, available: usize) -> TierState {
        match self.used_count(tier) {
            0 => TierState::Fresh,
            n if n >= available => TierState::Exhausted,
            _ => TierState::Partial,
        }
    }

    /// Record indices dispensed elsewhere as used in the current cycle.
    /// Out-of-range indices are skipped. Covering the whole tier starts a
    /// fresh cycle, the same as dispensing the last index would.
    pub fn mark_used(
        &mut self,
        tier: &Tier,
        indices: impl IntoIterator<Item = usize>,
        available: usize,
    ) {
        let used = self.used.entry(tier.clone()).or_default();
        used.extend(indices.into_iter().filter(|&i| i < available));
        if used.len() >= available {
            used.clear();
        }
    }

    /// Forget the current cycle of one tier.
    pub fn reset(&mut self, tier: &Tier) {
        self.used.remove(tier);
    }

    pub fn reset_all(&mut self) {
        self.used.clear();
    }
}
