//! Prompts for word generation and example enrichment.

use crate::types::{Tier, VocabularyEntry};

/// System prompt shared by both calls.
pub const SYSTEM_PROMPT: &str =
    "You are a Twi (Akan) language expert helping English speakers learn everyday vocabulary.";

/// Prompt for generating one word for a tier.
pub const GENERATE_WORD_PROMPT: &str = r#"Generate a random Akan Twi word for a {tier} learner with the following JSON structure. Return ONLY valid JSON, no other text:
{
  "word": "Twi word here",
  "pronunciation": "phonetic pronunciation",
  "definition": "English meaning",
  "example": {
    "twi": "Example sentence in Twi",
    "english": "English translation of the example"
  }
}

Important: The word should be commonly used in Akan language. Make sure pronunciation is easy to understand.
{guidance}"#;

/// Prompt for one example sentence.
pub const EXAMPLE_SENTENCE_PROMPT: &str = r#"Create ONE simple example sentence in Twi using the word "{term}" ({definition}).
The sentence should be simple, practical, and show how the word is used in context.
Respond with ONLY the sentence in Twi, nothing else. No explanations, no JSON, just the sentence.
Example format: "Me din de Kwaku. Me dɔ su." (My name is Kwaku. I like water.)"#;

fn tier_guidance(tier: &Tier) -> &'static str {
    match tier.as_str() {
        Tier::EASY => "Pick a short, high-frequency word: a pronoun, a basic verb or an everyday object.",
        Tier::INTERMEDIATE => "Pick a common noun, greeting or short phrase used in daily life.",
        Tier::DIFFICULT => "Pick an expressive phrase, proverb fragment or abstract concept.",
        _ => "",
    }
}

/// Build the generation prompt for a tier.
pub fn build_generate_prompt(tier: &Tier) -> String {
    GENERATE_WORD_PROMPT
        .replace("{tier}", tier.as_str())
        .replace("{guidance}", tier_guidance(tier))
        .trim_end()
        .to_string()
}

/// Build the example sentence prompt for an entry.
pub fn build_example_prompt(entry: &VocabularyEntry) -> String {
    EXAMPLE_SENTENCE_PROMPT
        .replace("{term}", &entry.term)
        .replace("{definition}", &entry.definition)
}

/// Reduce a free-text reply to a single sentence.
///
/// Takes the first non-blank line and strips wrapping quotes. Returns
/// `None` when nothing usable is left.
pub fn clean_sentence(reply: &str) -> Option<String> {
    let line = reply.lines().map(str::trim).find(|l| !l.is_empty())?;
    let stripped = line
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”' | '`'))
        .trim();

    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
