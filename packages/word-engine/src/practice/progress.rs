//! Badges, points and practice streaks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::PracticeStats;
use crate::types::Tier;

/// Total points at which the one-time reward unlocks.
pub const REWARD_MILESTONE_POINTS: u32 = 100;

/// Rank earned by total words practiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    /// 0-20 words
    Silver,
    /// 21-99 words
    Bronze,
    /// 100-199 words
    Gold,
    /// 200+ words
    Legend,
}

impl Badge {
    pub fn for_word_count(words: usize) -> Self {
        match words {
            200.. => Self::Legend,
            100..=199 => Self::Gold,
            21..=99 => Self::Bronze,
            _ => Self::Silver,
        }
    }

    /// Words needed to hold this badge.
    pub fn threshold(&self) -> usize {
        match self {
            Self::Silver => 0,
            Self::Bronze => 21,
            Self::Gold => 100,
            Self::Legend => 200,
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Silver => Some(Self::Bronze),
            Self::Bronze => Some(Self::Gold),
            Self::Gold => Some(Self::Legend),
            Self::Legend => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
            Self::Gold => "🏆",
            Self::Legend => "👑",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Silver => "Silver Badge",
            Self::Bronze => "Bronze Badge",
            Self::Gold => "Gold Badge",
            Self::Legend => "Legend Badge",
        };
        f.write_str(name)
    }
}

/// One finished session in the learner's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub practiced_on: NaiveDate,
    pub tier: Tier,
    pub words_practiced: usize,
    pub points_earned: u32,
    /// Running word total after this session
    pub total_words: usize,
}

/// What changed after recording a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeOutcome {
    pub new_badge_unlocked: Option<Badge>,
    pub reward_milestone_reached: bool,
    pub streak: u32,
}

/// Accumulated progress of one learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub total_points: u32,
    pub total_words_practiced: usize,
    pub sessions_completed: usize,
    pub current_badge: Badge,
    pub badges_earned: Vec<Badge>,
    pub history: Vec<PracticeRecord>,
    pub last_practice_date: Option<NaiveDate>,
    pub practice_streak: u32,
    pub created_at: DateTime<Utc>,
}

impl Default for LearnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LearnerProgress {
    pub fn new() -> Self {
        Self {
            total_points: 0,
            total_words_practiced: 0,
            sessions_completed: 0,
            current_badge: Badge::Silver,
            badges_earned: vec![Badge::Silver],
            history: Vec::new(),
            last_practice_date: None,
            practice_streak: 0,
            created_at: Utc::now(),
        }
    }

    /// Fold a finished session into the totals.
    pub fn record_practice(&mut self, stats: &PracticeStats, date: NaiveDate) -> PracticeOutcome {
        let points_before = self.total_points;

        self.total_points += stats.points_earned;
        self.total_words_practiced += stats.words_practiced;
        self.sessions_completed += 1;
        self.practice_streak = self.next_streak(date);
        self.last_practice_date = Some(date);

        self.history.push(PracticeRecord {
            practiced_on: date,
            tier: stats.tier.clone(),
            words_practiced: stats.words_practiced,
            points_earned: stats.points_earned,
            total_words: self.total_words_practiced,
        });

        let badge = Badge::for_word_count(self.total_words_practiced);
        self.current_badge = badge;
        let new_badge_unlocked = if self.badges_earned.contains(&badge) {
            None
        } else {
            self.badges_earned.push(badge);
            Some(badge)
        };

        PracticeOutcome {
            new_badge_unlocked,
            reward_milestone_reached: points_before < REWARD_MILESTONE_POINTS
                && self.total_points >= REWARD_MILESTONE_POINTS,
            streak: self.practice_streak,
        }
    }

    fn next_streak(&self, date: NaiveDate) -> u32 {
        let Some(last) = self.last_practice_date else {
            return 1;
        };
        match (date - last).num_days() {
            0 => self.practice_streak.max(1),
            1 => self.practice_streak + 1,
            _ => 1,
        }
    }

    /// Words still needed for the next badge, if there is one.
    pub fn words_to_next_badge(&self) -> Option<usize> {
        self.current_badge
            .next()
            .map(|b| b.threshold().saturating_sub(self.total_words_practiced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(words: usize, correct: usize) -> PracticeStats {
        PracticeStats {
            tier: Tier::easy(),
            words_practiced: words,
            correct,
            skipped: words - correct,
            points_earned: correct as u32 * crate::practice::POINTS_PER_CORRECT,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_badge_thresholds() {
        assert_eq!(Badge::for_word_count(0), Badge::Silver);
        assert_eq!(Badge::for_word_count(20), Badge::Silver);
        assert_eq!(Badge::for_word_count(21), Badge::Bronze);
        assert_eq!(Badge::for_word_count(99), Badge::Bronze);
        assert_eq!(Badge::for_word_count(100), Badge::Gold);
        assert_eq!(Badge::for_word_count(200), Badge::Legend);
        assert_eq!(Badge::Legend.next(), None);
    }

    #[test]
    fn test_streak_rules() {
        let mut progress = LearnerProgress::new();

        assert_eq!(progress.record_practice(&stats(5, 5), day(1)).streak, 1);
        assert_eq!(progress.record_practice(&stats(5, 5), day(1)).streak, 1);
        assert_eq!(progress.record_practice(&stats(5, 5), day(2)).streak, 2);
        assert_eq!(progress.record_practice(&stats(5, 5), day(3)).streak, 3);
        assert_eq!(progress.record_practice(&stats(5, 5), day(6)).streak, 1);
        assert_eq!(progress.sessions_completed, 5);
        assert_eq!(progress.last_practice_date, Some(day(6)));
    }

    #[test]
    fn test_badge_unlock_is_reported_once() {
        let mut progress = LearnerProgress::new();

        let outcome = progress.record_practice(&stats(15, 10), day(1));
        assert_eq!(outcome.new_badge_unlocked, None);

        let outcome = progress.record_practice(&stats(10, 0), day(2));
        assert_eq!(outcome.new_badge_unlocked, Some(Badge::Bronze));
        assert_eq!(progress.current_badge, Badge::Bronze);

        let outcome = progress.record_practice(&stats(10, 0), day(3));
        assert_eq!(outcome.new_badge_unlocked, None);
        assert_eq!(progress.badges_earned, vec![Badge::Silver, Badge::Bronze]);
        assert_eq!(progress.words_to_next_badge(), Some(65));
    }

    #[test]
    fn test_reward_milestone_fires_on_crossing() {
        let mut progress = LearnerProgress::new();

        assert!(!progress.record_practice(&stats(9, 9), day(1)).reward_milestone_reached);
        assert!(progress.record_practice(&stats(2, 2), day(1)).reward_milestone_reached);
        assert!(!progress.record_practice(&stats(5, 5), day(2)).reward_milestone_reached);
        assert_eq!(progress.total_points, 160);
        assert_eq!(progress.history.len(), 3);
        assert_eq!(progress.history[2].total_words, 16);
    }
}
