//! Terminal formatting.

use colored::Colorize;
use word_engine::{Badge, LexiconEntry, PracticeOutcome, PracticeStats, VocabularyEntry};

pub fn print_banner(title: &str) {
    println!("{}", "╔════════════════════════════════════════╗".bright_cyan());
    println!("{}", format!("║ {:<38} ║", title).bright_cyan());
    println!("{}", "╚════════════════════════════════════════╝".bright_cyan());
    println!();
}

pub fn print_entry(entry: &VocabularyEntry) {
    let marker = if entry.is_verified() {
        "✓ verified".green()
    } else {
        "✧ generated".yellow()
    };

    println!(
        "{} {}  {}",
        format!("#{}", entry.id).dimmed(),
        entry.term.bright_white().bold(),
        format!("[{}]", entry.pronunciation).cyan()
    );
    println!("    {}", entry.definition);
    if let Some(example) = &entry.example {
        println!("    {} {}", "e.g.".dimmed(), example.italic());
    }
    println!("    {} · {}", entry.tier.to_string().magenta(), marker);
}

pub fn print_lexicon_entry(entry: &LexiconEntry) {
    println!(
        "{}  {}  {}  {}",
        entry.term.bright_white().bold(),
        format!("[{}]", entry.pronunciation).cyan(),
        entry.definition,
        entry.tier.to_string().magenta()
    );
}

pub fn print_session_summary(stats: &PracticeStats, outcome: &PracticeOutcome) {
    println!();
    println!("{}", "Practice complete".bright_green().bold());
    println!(
        "  Correct: {} | Skipped: {} | Points: {}",
        stats.correct.to_string().green(),
        stats.skipped.to_string().yellow(),
        format!("+{} GH₵", stats.points_earned).bright_yellow()
    );
    println!("  Streak: {} day(s)", outcome.streak);

    if let Some(badge) = outcome.new_badge_unlocked {
        println!();
        println!("  {} New badge: {}", badge.icon(), badge_label(badge));
    }
    if outcome.reward_milestone_reached {
        println!();
        println!("  {}", "🎉 You reached 100 GH₵! Ayekoo!".bright_magenta().bold());
    }
}

pub fn badge_label(badge: Badge) -> colored::ColoredString {
    let name = badge.to_string();
    let label = match badge {
        Badge::Silver => name.white(),
        Badge::Bronze => name.truecolor(205, 127, 50),
        Badge::Gold => name.yellow(),
        Badge::Legend => name.bright_magenta(),
    };
    label.bold()
}
