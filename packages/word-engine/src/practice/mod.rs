//! Practice mode: translate-the-word quizzes and learner progress.

pub mod progress;

pub use progress::{Badge, LearnerProgress, PracticeOutcome, PracticeRecord};

use serde::{Deserialize, Serialize};

use crate::types::{Tier, VocabularyEntry};

/// Points awarded for each correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Every answer a definition accepts.
///
/// Definitions list alternatives separated by `/` (`"Woman/Girl"`); each
/// alternative is trimmed and lowercased, blanks are dropped.
pub fn accepted_answers(definition: &str) -> Vec<String> {
    definition
        .split('/')
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect()
}

/// Whether `answer` matches any accepted answer, ignoring case and
/// surrounding whitespace.
pub fn is_correct_answer(definition: &str, answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    !answer.is_empty() && accepted_answers(definition).contains(&answer)
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct { points: u32 },
    /// Carries the full definition as the expected answer
    Incorrect { expected: String },
}

impl AnswerFeedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }
}

/// Tally of one practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeStats {
    pub tier: Tier,
    /// Words answered or skipped
    pub words_practiced: usize,
    pub correct: usize,
    pub skipped: usize,
    pub points_earned: u32,
}

/// A quiz over a fixed list of entries, one answer per word.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    tier: Tier,
    entries: Vec<VocabularyEntry>,
    position: usize,
    responded: bool,
    stats: PracticeStats,
}

impl PracticeSession {
    pub fn new(tier: Tier, entries: Vec<VocabularyEntry>) -> Self {
        Self {
            stats: PracticeStats {
                tier: tier.clone(),
                words_practiced: 0,
                correct: 0,
                skipped: 0,
                points_earned: 0,
            },
            tier,
            entries,
            position: 0,
            responded: false,
        }
    }

    pub fn tier(&self) -> &Tier {
        &self.tier
    }

    /// The word being asked, or `None` once the session is over.
    pub fn current(&self) -> Option<&VocabularyEntry> {
        self.entries.get(self.position)
    }

    /// 1-based position and total, for progress display.
    pub fn progress(&self) -> (usize, usize) {
        ((self.position + 1).min(self.entries.len()), self.entries.len())
    }

    /// Check an answer for the current word.
    ///
    /// Returns `None` when the session is over or the current word was
    /// already answered or skipped.
    pub fn submit(&mut self, answer: &str) -> Option<AnswerFeedback> {
        let entry = self.entries.get(self.position)?;
        if self.responded {
            return None;
        }
        self.responded = true;
        self.stats.words_practiced += 1;

        if is_correct_answer(&entry.definition, answer) {
            self.stats.correct += 1;
            self.stats.points_earned += POINTS_PER_CORRECT;
            Some(AnswerFeedback::Correct {
                points: POINTS_PER_CORRECT,
            })
        } else {
            Some(AnswerFeedback::Incorrect {
                expected: entry.definition.clone(),
            })
        }
    }

    /// Give up on the current word. Returns its definition.
    pub fn skip(&mut self) -> Option<&str> {
        let entry = self.entries.get(self.position)?;
        if self.responded {
            return None;
        }
        self.responded = true;
        self.stats.words_practiced += 1;
        self.stats.skipped += 1;
        Some(entry.definition.as_str())
    }

    /// Move to the next word. Returns `false` when there is none.
    pub fn advance(&mut self) -> bool {
        if self.position < self.entries.len() {
            self.position += 1;
            self.responded = false;
        }
        self.position < self.entries.len()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.entries.len()
    }

    pub fn stats(&self) -> &PracticeStats {
        &self.stats
    }
}
