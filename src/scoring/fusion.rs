// Score fusion — classifier probability and corpus similarity combined
// into the final 0-100 plagiarism score.
//
// The classifier is weighted higher because it generalizes beyond lexical
// overlap; similarity anchors the score against verbatim copying the
// classifier might miss.

/// Fixed design constants for combining the two signals.
pub struct FusionWeights {
    /// Weight on the classifier probability (default 0.6)
    pub classifier: f64,
    /// Weight on the corpus similarity (default 0.4)
    pub similarity: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            classifier: 0.6,
            similarity: 0.4,
        }
    }
}

/// Combine classifier probability and similarity (both in [0, 1]) into the
/// final score, clamped to [0, 100].
pub fn combine(probability: f64, similarity: f64, weights: &FusionWeights) -> f64 {
    let score = (probability * weights.classifier + similarity * weights.similarity) * 100.0;
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let w = FusionWeights::default();
        // 0.6 * 0.5 + 0.4 * 0.25 = 0.4
        let score = combine(0.5, 0.25, &w);
        assert!((score - 40.0).abs() < 1e-9, "expected 40.0, got {score}");
    }

    #[test]
    fn both_signals_maxed_gives_hundred() {
        let score = combine(1.0, 1.0, &FusionWeights::default());
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn both_signals_zero_gives_zero() {
        assert_eq!(combine(0.0, 0.0, &FusionWeights::default()), 0.0);
    }

    #[test]
    fn similarity_alone_reaches_forty() {
        let score = combine(0.0, 1.0, &FusionWeights::default());
        assert!((score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn clamps_out_of_range_inputs() {
        let w = FusionWeights::default();
        assert_eq!(combine(5.0, 5.0, &w), 100.0);
        assert_eq!(combine(-1.0, -1.0, &w), 0.0);
    }
}
