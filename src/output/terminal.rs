// Colored terminal output for scores and reports.
//
// This module handles all terminal-specific formatting: colors and layout
// live here, not on the report types. The main.rs display paths delegate
// here.

use colored::{ColoredString, Colorize};

use crate::scoring::report::{PlagiarismReport, RiskLevel};

/// Display a bare score with its risk bucket.
pub fn display_score(score: f64) {
    let level = RiskLevel::from_score(score);
    println!(
        "Plagiarism score: {:.2}/100  [{}]",
        score,
        colorize_level(level)
    );
}

/// Display a full report.
pub fn display_report(report: &PlagiarismReport) {
    println!("\n{}", "=== Originality Report ===".bold());
    println!();
    println!(
        "  Plagiarism score: {:.2}/100  [{}]",
        report.plagiarism_score,
        colorize_level(report.risk_level)
    );
    println!("  Corpus similarity: {:.2}%", report.similarity_score);
    println!();
    println!(
        "  Words: {}  Characters: {}  Unique words: {}",
        report.word_count, report.character_count, report.unique_words
    );
    println!();
    println!("  Recommendations:");
    for (i, recommendation) in report.recommendations.iter().enumerate() {
        println!("    {}. {}", i + 1, recommendation);
    }
    println!();
    println!("  Generated: {}", report.timestamp.dimmed());
}

/// Colorize a risk level label.
fn colorize_level(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::VeryHigh => level.as_str().red().bold(),
        RiskLevel::High => level.as_str().bright_red(),
        RiskLevel::Medium => level.as_str().yellow(),
        RiskLevel::Low => level.as_str().green(),
    }
}
