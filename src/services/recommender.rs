use std::collections::HashMap;

use crate::models::{MovieRecord, ScoredMovie};

use super::similarity::SimilarityIndex;
use super::IndexOptions;

/// Lookup failures of the recommender
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("movie title not found: {0}")]
    TitleNotFound(String),

    #[error("movie id not found: {0}")]
    IdNotFound(i64),
}

/// Content-based recommender over an immutable catalog.
///
/// The record table and the similarity index are built together and never
/// change afterwards, so row `i` of one always describes row `i` of the other.
#[derive(Debug)]
pub struct Recommender {
    records: Vec<MovieRecord>,
    index: SimilarityIndex,
    /// First row of each title
    by_title: HashMap<String, usize>,
    /// First row of each id
    by_id: HashMap<i64, usize>,
}

impl Recommender {
    /// Vectorize `records` and precompute all pairwise similarities.
    ///
    /// `options.cast_limit` is applied when the records' tags are built, not here.
    pub fn new(records: Vec<MovieRecord>, options: &IndexOptions) -> Self {
        let documents: Vec<String> = records.iter().map(MovieRecord::document).collect();
        let index = SimilarityIndex::build(
            &documents,
            options.max_vocabulary_size,
            options.stop_words.filter(),
        );

        let mut by_title = HashMap::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            by_title.entry(record.title.clone()).or_insert(row);
            by_id.entry(record.id).or_insert(row);
        }

        Self {
            records,
            index,
            by_title,
            by_id,
        }
    }

    /// Titles of the `k` movies most similar to `title`.
    ///
    /// With duplicate titles the first row in table order is the query.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<String>, RecommendError> {
        Ok(self
            .recommend_scored(title, k)?
            .into_iter()
            .map(|m| m.title)
            .collect())
    }

    pub fn recommend_scored(&self, title: &str, k: usize) -> Result<Vec<ScoredMovie>, RecommendError> {
        let row = self
            .by_title
            .get(title)
            .copied()
            .ok_or_else(|| RecommendError::TitleNotFound(title.to_string()))?;
        Ok(self.rank(row, k))
    }

    /// Like [`Self::recommend_scored`], with the query movie chosen by id
    pub fn recommend_by_id(&self, id: i64, k: usize) -> Result<Vec<ScoredMovie>, RecommendError> {
        let row = self
            .by_id
            .get(&id)
            .copied()
            .ok_or(RecommendError::IdNotFound(id))?;
        Ok(self.rank(row, k))
    }

    /// Every other row by descending similarity, ties in table order
    fn rank(&self, row: usize, k: usize) -> Vec<ScoredMovie> {
        let similarities = self.index.row(row);

        let mut candidates: Vec<(usize, f64)> = similarities
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, _)| i != row)
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.truncate(k);

        candidates
            .into_iter()
            .map(|(i, score)| {
                let record = &self.records[i];
                ScoredMovie {
                    id: record.id,
                    title: record.title.clone(),
                    score,
                }
            })
            .collect()
    }

    /// Catalog titles in table order
    pub fn titles(&self) -> Vec<String> {
        self.records.iter().map(|r| r.title.clone()).collect()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.index.vocabulary().len()
    }

    /// Titles shared by more than one row, in order of first appearance
    pub fn duplicate_titles(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.title.as_str()).or_insert(0) += 1;
        }

        let mut duplicates = Vec::new();
        for record in &self.records {
            let title = record.title.as_str();
            if counts.get(title).is_some_and(|&c| c > 1) && !duplicates.contains(&title) {
                duplicates.push(title);
            }
        }
        duplicates
    }
}
