// Detector — the scoring engine façade.
//
// Pipeline per call: normalize → {features → classifier probability;
// corpus similarity} → fusion. The model artifact is an explicit
// dependency held by the detector, never a process-wide global. Read
// operations borrow `&self`; the two mutation paths (`add_reference`,
// `retrain`) take `&mut self` and persist before returning, so a
// concurrent deployment gets the required readers-writer discipline by
// wrapping the detector in `Arc<RwLock<_>>`.

use std::collections::HashSet;

use anyhow::Result;
use chrono::Local;
use tracing::{info, warn};

use crate::scoring::fusion::{self, FusionWeights};
use crate::scoring::report::{round2, PlagiarismReport, RiskLevel};
use crate::similarity;
use crate::store::{self, LoadOutcome, ModelArtifact, ModelStore};
use crate::text::features::FeatureVector;
use crate::text::normalize::normalize;

/// Trimmed inputs shorter than this score 0.0 outright. The floor also keeps
/// the zero-word NaN feature away from the classifier.
pub const MIN_TEXT_CHARS: usize = 10;

pub struct Detector {
    artifact: ModelArtifact,
    store: ModelStore,
    weights: FusionWeights,
}

impl Detector {
    pub fn new(artifact: ModelArtifact, store: ModelStore) -> Self {
        Self {
            artifact,
            store,
            weights: FusionWeights::default(),
        }
    }

    /// Open the detector against a store, training a fresh bootstrap model
    /// on first run.
    pub fn open(store: ModelStore, seed: u64) -> Result<Self> {
        let outcome = store.ensure_loaded(seed)?;
        match &outcome {
            LoadOutcome::Loaded(artifact) => info!(
                corpus = artifact.reference_corpus.len(),
                trained_at = %artifact.trained_at,
                "loaded model artifact"
            ),
            LoadOutcome::Trained(artifact) => info!(
                corpus = artifact.reference_corpus.len(),
                holdout_accuracy = artifact.holdout_accuracy,
                "trained and saved a fresh model artifact"
            ),
        }
        Ok(Self::new(outcome.into_artifact(), store))
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// The fused plagiarism score, in [0, 100]. Never fails: degenerate
    /// inputs score 0.0.
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().chars().count() < MIN_TEXT_CHARS {
            return 0.0;
        }

        let normalized = normalize(text);
        let features = FeatureVector::extract(&normalized);
        let probability = if features.is_finite() {
            self.artifact
                .classifier
                .predict_probability(&features.as_array())
        } else {
            // Degraded but non-fatal: contribute nothing to the score
            warn!("non-finite feature vector, classifier contribution set to 0");
            0.0
        };
        let similarity =
            similarity::max_cosine(&normalized, &self.artifact.reference_corpus);

        fusion::combine(probability, similarity, &self.weights)
    }

    /// Corpus similarity for the text, in [0, 1].
    pub fn similarity(&self, text: &str) -> f64 {
        let normalized = normalize(text);
        similarity::max_cosine(&normalized, &self.artifact.reference_corpus)
    }

    /// Build the full report. Recomputes the scoring pipeline — it is cheap
    /// next to the I/O around it.
    pub fn build_report(&self, text: &str) -> PlagiarismReport {
        let normalized = normalize(text);
        let plagiarism_score = self.score(text);
        let similarity = self.similarity(text);
        let risk_level = RiskLevel::from_score(plagiarism_score);

        let words: Vec<&str> = normalized.split_whitespace().collect();
        let unique_words: HashSet<&str> = words.iter().copied().collect();

        PlagiarismReport {
            plagiarism_score: round2(plagiarism_score),
            similarity_score: round2(similarity * 100.0),
            risk_level,
            word_count: words.len(),
            character_count: normalized.chars().count(),
            unique_words: unique_words.len(),
            recommendations: risk_level.recommendations(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Append a text to the reference corpus (exact-string dedup on the
    /// normalized form) and persist the whole artifact. This is the only
    /// corpus-mutation path.
    pub fn add_reference(&mut self, text: &str) -> Result<()> {
        let normalized = normalize(text);
        if self.artifact.reference_corpus.contains(&normalized) {
            info!("reference already present, corpus unchanged");
            return Ok(());
        }
        self.artifact.reference_corpus.push(normalized);
        self.store.save(&self.artifact)?;
        info!(
            corpus = self.artifact.reference_corpus.len(),
            "reference added and artifact persisted"
        );
        Ok(())
    }

    /// Retrain from the bootstrap dataset, overwrite the persisted artifact,
    /// and return the holdout accuracy. Resets the reference corpus to the
    /// bootstrap texts.
    pub fn retrain(&mut self, seed: u64) -> Result<f64> {
        let artifact = store::train_artifact(seed)?;
        self.store.save(&artifact)?;
        self.artifact = artifact;
        Ok(self.artifact.holdout_accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> (tempfile::TempDir, Detector) {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("model.json"));
        let detector = Detector::open(store, 42).unwrap();
        (dir, detector)
    }

    #[test]
    fn empty_text_scores_zero() {
        let (_dir, d) = detector();
        assert_eq!(d.score(""), 0.0);
    }

    #[test]
    fn short_text_scores_zero() {
        let (_dir, d) = detector();
        assert_eq!(d.score("hello"), 0.0);
        assert_eq!(d.score("   a b c   "), 0.0);
    }

    #[test]
    fn score_is_within_range() {
        let (_dir, d) = detector();
        for text in [
            "Machine learning is a subset of artificial intelligence that focuses on algorithms.",
            "A perfectly ordinary sentence about nothing in particular, written for a test.",
            "!!!???...;;;:::",
        ] {
            let score = d.score(text);
            assert!((0.0..=100.0).contains(&score), "score {score} for {text:?}");
        }
    }

    #[test]
    fn punctuation_only_text_is_degenerate_not_fatal() {
        // Passes the length floor and tokenizes as a single punctuation
        // "word" — still a valid, in-range score
        let (_dir, d) = detector();
        let score = d.score("!!!???...;;;");
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn stripped_to_nothing_text_hits_the_nan_guard() {
        // Long enough to pass the floor, but every character is stripped by
        // normalization: zero words, avg_word_length NaN, both signals 0
        let (_dir, d) = detector();
        assert_eq!(d.score("🎉🎉🎉🎉🎉🎉🎉🎉🎉🎉🎉🎉"), 0.0);
    }

    #[test]
    fn report_on_empty_text_is_low_risk() {
        let (_dir, d) = detector();
        let report = d.build_report("");
        assert_eq!(report.plagiarism_score, 0.0);
        assert_eq!(report.risk_level, RiskLevel::Low);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.unique_words, 0);
    }

    #[test]
    fn report_counts_words_on_normalized_text() {
        let (_dir, d) = detector();
        let report = d.build_report("The THE the quick   quick fox!");
        assert_eq!(report.word_count, 6);
        assert_eq!(report.unique_words, 3);
    }
}
