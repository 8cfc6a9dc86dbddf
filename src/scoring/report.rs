// Risk levels and the structured plagiarism report.
//
// The report is a derived, read-only snapshot: the core never persists it.

use serde::{Deserialize, Serialize};

/// Four-bucket categorical risk derived from the plagiarism score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// Determine the risk level from a plagiarism score (0-100).
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 50.0 => RiskLevel::VeryHigh,
            s if s >= 30.0 => RiskLevel::High,
            s if s >= 15.0 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }

    /// The fixed, ordered recommendation strings for this bucket.
    pub fn recommendations(&self) -> Vec<String> {
        let lines: &[&str] = match self {
            RiskLevel::Low => &[
                "Content appears to be original.",
                "Good academic integrity maintained.",
            ],
            RiskLevel::Medium => &[
                "Some similarities detected with existing content.",
                "Review citations and references.",
                "Consider paraphrasing similar sections.",
            ],
            RiskLevel::High => &[
                "Significant similarities found.",
                "Manual review recommended.",
                "Check for proper citations and quotations.",
                "Consider rewriting similar sections.",
            ],
            RiskLevel::VeryHigh => &[
                "High plagiarism risk detected.",
                "Immediate manual review required.",
                "Substantial rewriting may be necessary.",
                "Verify all sources are properly cited.",
            ],
        };
        lines.iter().map(|s| s.to_string()).collect()
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The full originality report for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlagiarismReport {
    /// Fused plagiarism score, 0-100, rounded to two decimals
    pub plagiarism_score: f64,
    /// Corpus similarity expressed as a percentage, rounded to two decimals
    pub similarity_score: f64,
    pub risk_level: RiskLevel,
    pub word_count: usize,
    pub character_count: usize,
    pub unique_words: usize,
    pub recommendations: Vec<String>,
    /// Wall-clock generation time, `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
}

/// Round to two decimal places for report display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
