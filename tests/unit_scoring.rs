// Unit tests for scoring and report functions.
//
// Tests isolated pure functions: RiskLevel::from_score boundary conditions,
// score fusion edge cases (weights, clamping), recommendation text, and
// report serialization.

use veridian::scoring::fusion::{combine, FusionWeights};
use veridian::scoring::report::{round2, PlagiarismReport, RiskLevel};

// ============================================================
// RiskLevel::from_score — boundary conditions
// ============================================================

#[test]
fn level_exact_boundary_very_high() {
    assert_eq!(RiskLevel::from_score(50.0), RiskLevel::VeryHigh);
}

#[test]
fn level_just_below_very_high() {
    assert_eq!(RiskLevel::from_score(49.999), RiskLevel::High);
}

#[test]
fn level_exact_boundary_high() {
    assert_eq!(RiskLevel::from_score(30.0), RiskLevel::High);
}

#[test]
fn level_just_below_high() {
    assert_eq!(RiskLevel::from_score(29.999), RiskLevel::Medium);
}

#[test]
fn level_exact_boundary_medium() {
    assert_eq!(RiskLevel::from_score(15.0), RiskLevel::Medium);
}

#[test]
fn level_just_below_medium() {
    assert_eq!(RiskLevel::from_score(14.999), RiskLevel::Low);
}

#[test]
fn level_zero() {
    assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
}

#[test]
fn level_top_of_range() {
    assert_eq!(RiskLevel::from_score(100.0), RiskLevel::VeryHigh);
}

#[test]
fn level_as_str_all_variants() {
    assert_eq!(RiskLevel::Low.as_str(), "Low");
    assert_eq!(RiskLevel::Medium.as_str(), "Medium");
    assert_eq!(RiskLevel::High.as_str(), "High");
    assert_eq!(RiskLevel::VeryHigh.as_str(), "Very High");
}

#[test]
fn level_display_matches_as_str() {
    for level in [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ] {
        assert_eq!(level.to_string(), level.as_str());
    }
}

// ============================================================
// Score fusion
// ============================================================

#[test]
fn fusion_weights_default_to_sixty_forty() {
    let w = FusionWeights::default();
    assert_eq!(w.classifier, 0.6);
    assert_eq!(w.similarity, 0.4);
}

#[test]
fn fusion_is_linear_in_both_signals() {
    let w = FusionWeights::default();
    // 0.6 * 0.3 + 0.4 * 0.8 = 0.50
    let score = combine(0.3, 0.8, &w);
    assert!((score - 50.0).abs() < 1e-9, "expected 50.0, got {score}");
}

#[test]
fn fusion_never_leaves_range() {
    let w = FusionWeights::default();
    for p in [0.0, 0.25, 0.5, 0.75, 1.0] {
        for s in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let score = combine(p, s, &w);
            assert!((0.0..=100.0).contains(&score), "p={p} s={s} -> {score}");
        }
    }
}

#[test]
fn fusion_similarity_floor_guarantees_high_bucket() {
    // An exact corpus match (similarity 1.0) lands in at least High even
    // when the classifier contributes nothing.
    let score = combine(0.0, 1.0, &FusionWeights::default());
    assert_eq!(RiskLevel::from_score(score), RiskLevel::High);
}

// ============================================================
// Recommendations — literal, fixed, ordered
// ============================================================

#[test]
fn low_recommendations_text() {
    assert_eq!(
        RiskLevel::Low.recommendations(),
        vec![
            "Content appears to be original.".to_string(),
            "Good academic integrity maintained.".to_string(),
        ]
    );
}

#[test]
fn very_high_recommendations_text() {
    assert_eq!(
        RiskLevel::VeryHigh.recommendations(),
        vec![
            "High plagiarism risk detected.".to_string(),
            "Immediate manual review required.".to_string(),
            "Substantial rewriting may be necessary.".to_string(),
            "Verify all sources are properly cited.".to_string(),
        ]
    );
}

// ============================================================
// Report serialization
// ============================================================

#[test]
fn report_json_field_names() {
    let report = PlagiarismReport {
        plagiarism_score: 42.5,
        similarity_score: 61.25,
        risk_level: RiskLevel::High,
        word_count: 120,
        character_count: 640,
        unique_words: 95,
        recommendations: RiskLevel::High.recommendations(),
        timestamp: "2026-01-15 09:30:00".to_string(),
    };
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["plagiarism_score"], 42.5);
    assert_eq!(json["similarity_score"], 61.25);
    assert_eq!(json["risk_level"], "High");
    assert_eq!(json["word_count"], 120);
    assert_eq!(json["unique_words"], 95);
    assert_eq!(json["timestamp"], "2026-01-15 09:30:00");
    assert!(json["recommendations"].is_array());
}

#[test]
fn report_round_trips_through_json() {
    let report = PlagiarismReport {
        plagiarism_score: round2(7.129),
        similarity_score: round2(3.333),
        risk_level: RiskLevel::Low,
        word_count: 10,
        character_count: 55,
        unique_words: 9,
        recommendations: RiskLevel::Low.recommendations(),
        timestamp: "2026-01-15 09:30:00".to_string(),
    };
    let json = serde_json::to_string(&report).unwrap();
    let back: PlagiarismReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.plagiarism_score, report.plagiarism_score);
    assert_eq!(back.risk_level, RiskLevel::Low);
    assert_eq!(back.recommendations, report.recommendations);
}
