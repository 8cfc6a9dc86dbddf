// TF-IDF n-gram vectorization for corpus similarity.
//
// Represents each document as an L2-normalized vector of weighted n-grams
// (unigram through trigram) over a shared vocabulary. The vectorizer is fit
// jointly on the reference corpus plus the candidate at query time, so the
// vocabulary always covers whatever the candidate actually says.
//
// Everything here is deterministic: term counting uses ordered maps and the
// vocabulary is selected with a total ordering, so identical inputs always
// produce bit-identical vectors.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

/// Vocabulary cap. Terms beyond the most frequent 5000 are dropped.
pub const MAX_FEATURES: usize = 5000;

fn word_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Tokens of at least two word characters, mirroring the usual
    // bag-of-words token pattern
    RE.get_or_init(|| Regex::new(r"\w\w+").unwrap())
}

fn english_stop_words() -> &'static HashSet<String> {
    static WORDS: OnceLock<HashSet<String>> = OnceLock::new();
    WORDS.get_or_init(|| get(LANGUAGE::English).into_iter().collect())
}

/// A sparse document vector: (vocabulary index, weight) pairs sorted by index.
#[derive(Debug, Clone, Default)]
pub struct SparseVector {
    terms: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.terms.len() && j < other.terms.len() {
            let (ia, va) = self.terms[i];
            let (ib, vb) = other.terms[j];
            match ia.cmp(&ib) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += va * vb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalize(&mut self) {
        let norm = self.terms.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut self.terms {
                *v /= norm;
            }
        }
    }
}

/// TF-IDF vectorizer over word n-grams.
pub struct TfIdfVectorizer {
    /// Vocabulary size cap (most frequent terms kept)
    pub max_features: usize,
    /// Smallest n-gram length
    pub ngram_min: usize,
    /// Largest n-gram length
    pub ngram_max: usize,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self {
            max_features: MAX_FEATURES,
            ngram_min: 1,
            ngram_max: 3,
        }
    }
}

impl TfIdfVectorizer {
    /// Fit on the documents and return one L2-normalized vector per document,
    /// in input order. Documents whose vocabulary collapses to nothing (e.g.
    /// stop words only) come back as empty vectors.
    pub fn fit_transform(&self, documents: &[&str]) -> Vec<SparseVector> {
        let per_doc_counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| self.term_counts(doc))
            .collect();

        // Document frequency and total frequency per term, for IDF and for
        // vocabulary selection when the cap bites.
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        let mut total_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &per_doc_counts {
            for (term, count) in counts {
                *doc_freq.entry(term).or_insert(0) += 1;
                *total_freq.entry(term).or_insert(0) += count;
            }
        }

        // Most frequent terms first; ties broken lexicographically so the
        // vocabulary is stable across runs.
        let mut ranked: Vec<(&str, usize)> =
            total_freq.iter().map(|(t, c)| (*t, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let vocabulary: BTreeMap<&str, usize> = ranked
            .into_iter()
            .take(self.max_features)
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
        let n_docs = documents.len() as f64;
        let mut idf = vec![0.0; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            idf[idx] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
        }

        per_doc_counts
            .iter()
            .map(|counts| {
                let mut terms: Vec<(usize, f64)> = counts
                    .iter()
                    .filter_map(|(term, count)| {
                        vocabulary
                            .get(term.as_str())
                            .map(|&idx| (idx, *count as f64 * idf[idx]))
                    })
                    .collect();
                terms.sort_by_key(|(idx, _)| *idx);
                let mut vector = SparseVector { terms };
                vector.l2_normalize();
                vector
            })
            .collect()
    }

    /// Tokenize, drop stop words, then count n-grams over the surviving
    /// token stream.
    fn term_counts(&self, doc: &str) -> BTreeMap<String, usize> {
        let lower = doc.to_lowercase();
        let tokens: Vec<&str> = word_token()
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !english_stop_words().contains(*t))
            .collect();

        let mut counts = BTreeMap::new();
        for n in self.ngram_min..=self.ngram_max {
            if n == 0 || tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_documents_have_unit_cosine() {
        let v = TfIdfVectorizer::default();
        let docs = ["the quick brown fox jumps over the lazy dog"; 2];
        let vectors = v.fit_transform(&docs);
        assert!((vectors[0].dot(&vectors[1]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_documents_have_zero_cosine() {
        let v = TfIdfVectorizer::default();
        let docs = [
            "quantum entanglement violates classical locality",
            "sourdough bread requires patient fermentation overnight",
        ];
        let vectors = v.fit_transform(&docs);
        assert_eq!(vectors[0].dot(&vectors[1]), 0.0);
    }

    #[test]
    fn stop_words_only_collapses_to_empty_vector() {
        let v = TfIdfVectorizer::default();
        let vectors = v.fit_transform(&["and the of to in"]);
        assert!(vectors[0].is_empty());
    }

    #[test]
    fn shared_vocabulary_gives_partial_overlap() {
        let v = TfIdfVectorizer::default();
        let docs = [
            "machine learning models require training data",
            "machine learning models require careful evaluation",
        ];
        let vectors = v.fit_transform(&docs);
        let cosine = vectors[0].dot(&vectors[1]);
        assert!(cosine > 0.2, "expected meaningful overlap, got {cosine}");
        assert!(cosine < 1.0, "documents differ, got {cosine}");
    }

    #[test]
    fn deterministic_across_calls() {
        let v = TfIdfVectorizer::default();
        let docs = [
            "feature engineering plays a crucial role in model success",
            "overfitting occurs when a model learns the training data too well",
            "feature engineering has a crucial role in model success",
        ];
        let a = v.fit_transform(&docs);
        let b = v.fit_transform(&docs);
        assert_eq!(a[0].dot(&a[2]).to_bits(), b[0].dot(&b[2]).to_bits());
    }

    #[test]
    fn vocabulary_cap_keeps_most_frequent() {
        let v = TfIdfVectorizer {
            max_features: 2,
            ngram_min: 1,
            ngram_max: 1,
        };
        let vectors = v.fit_transform(&["alpha alpha alpha beta beta gamma"]);
        // Only alpha and beta survive the cap of 2
        assert_eq!(vectors[0].terms.len(), 2);
    }
}
