//! Bag-of-words count vectorizer.
//!
//! Documents are lowercased and split into tokens of two or more word
//! characters. The vocabulary keeps the `max_features` tokens with the highest
//! total count across the corpus (stop words excluded); each document becomes a
//! sparse vector of raw occurrence counts over that vocabulary.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;

use super::stopwords::StopWordsFilter;

/// One vocabulary column and its count in a document
pub type SparseEntry = (u32, u32);

/// A document's counts, sorted by column, zero counts omitted
pub type SparseCounts = Vec<SparseEntry>;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Lowercase a document and split it into word tokens
pub fn tokenize(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
    stop_words: StopWordsFilter,
    /// Tokens in column order (ascending)
    vocabulary: Vec<String>,
    index: HashMap<String, u32>,
}

impl CountVectorizer {
    pub fn new(max_features: usize, stop_words: StopWordsFilter) -> Self {
        Self {
            max_features,
            stop_words,
            vocabulary: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Learn the vocabulary from `documents` and return their count vectors.
    ///
    /// Tokens are ranked by their summed count over all documents, ties broken
    /// by ascending token.
    /// The kept tokens are then laid out in ascending order as columns.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseCounts> {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| {
                tokenize(doc.as_ref())
                    .into_iter()
                    .filter(|t| !self.stop_words.is_stop_word(t))
                    .collect()
            })
            .collect();

        // BTreeMap keeps candidate tokens in ascending order for the tie-break
        let mut corpus_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for token in tokenized.iter().flatten() {
            *corpus_counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        // Stable sort on frequency alone preserves the ascending token order of ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.max_features);

        let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort_unstable();

        self.index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        self.vocabulary = vocabulary;

        tokenized.iter().map(|tokens| self.count(tokens)).collect()
    }

    fn count(&self, tokens: &[String]) -> SparseCounts {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        for token in tokens {
            if let Some(&column) = self.index.get(token) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Column of `token`, if it made it into the vocabulary
    pub fn column(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&c| c as usize)
    }
}
