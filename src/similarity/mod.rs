// Corpus similarity — lexical overlap between a candidate document and the
// reference corpus.
//
// The term-weighting model is refit over corpus + candidate on every call
// rather than frozen at training time: arbitrary candidate text drifts out
// of any fixed vocabulary, and a stale vocabulary silently zeroes exactly
// the terms that matter. The cost is that cosine values are not comparable
// across different corpus states.

pub mod tfidf;

use tfidf::TfIdfVectorizer;

/// Maximum cosine similarity between the normalized candidate and any single
/// reference text. A single near-duplicate reference should dominate the
/// score, so this is a max, not a centroid comparison.
///
/// Returns 0.0 for an empty corpus or when the candidate's vocabulary
/// collapses to nothing — degenerate cases, not errors.
pub fn max_cosine(candidate_normalized: &str, corpus: &[String]) -> f64 {
    if corpus.is_empty() {
        return 0.0;
    }

    let vectorizer = TfIdfVectorizer::default();
    let mut documents: Vec<&str> = corpus.iter().map(String::as_str).collect();
    documents.push(candidate_normalized);

    let vectors = vectorizer.fit_transform(&documents);
    let (candidate, references) = match vectors.split_last() {
        Some(split) => split,
        None => return 0.0,
    };
    if candidate.is_empty() {
        return 0.0;
    }

    references
        .iter()
        .map(|reference| candidate.dot(reference))
        .fold(0.0, f64::max)
        .clamp(0.0, 1.0)
}
