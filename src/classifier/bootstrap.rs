// The fixed bootstrap training set.
//
// Ten hand-written "original" sentences paired with lightly paraphrased
// "plagiarized" variants. Small by design: the classifier is a heuristic
// style signal, not a forensic model, and a fixed dataset keeps training
// fully deterministic.

/// Original sentences, labeled 0.
pub const ORIGINAL_TEXTS: [&str; 10] = [
    "Machine learning is a subset of artificial intelligence that focuses on algorithms.",
    "The importance of data preprocessing cannot be overstated in machine learning projects.",
    "Neural networks are inspired by the biological neural networks of animal brains.",
    "Deep learning has revolutionized computer vision and natural language processing.",
    "Support vector machines are effective for classification and regression tasks.",
    "Cross-validation is essential for evaluating machine learning model performance.",
    "Feature engineering plays a crucial role in the success of machine learning models.",
    "Overfitting occurs when a model learns the training data too well.",
    "Regularization techniques help prevent overfitting in machine learning models.",
    "Ensemble methods combine multiple models to improve prediction accuracy.",
];

/// Paraphrased variants of the originals, labeled 1.
pub const PLAGIARIZED_TEXTS: [&str; 10] = [
    "Machine learning is a part of artificial intelligence that concentrates on algorithms.",
    "The significance of data preprocessing cannot be understated in ML projects.",
    "Neural nets are inspired by the biological neural networks of animal minds.",
    "Deep learning has transformed computer vision and natural language processing.",
    "Support vector machines are useful for classification and regression problems.",
    "Cross validation is essential for evaluating machine learning model performance.",
    "Feature engineering has a crucial role in the success of ML models.",
    "Overfitting happens when a model learns the training data too well.",
    "Regularization methods help prevent overfitting in machine learning models.",
    "Ensemble techniques combine multiple models to improve prediction accuracy.",
];

/// The full labeled dataset: originals first (label false), then the
/// paraphrased variants (label true).
pub fn labeled_texts() -> Vec<(&'static str, bool)> {
    ORIGINAL_TEXTS
        .iter()
        .map(|t| (*t, false))
        .chain(PLAGIARIZED_TEXTS.iter().map(|t| (*t, true)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_is_balanced() {
        let labeled = labeled_texts();
        assert_eq!(labeled.len(), 20);
        assert_eq!(labeled.iter().filter(|(_, plag)| *plag).count(), 10);
    }
}
