pub mod catalog;
pub mod dataset;
pub mod posters;
pub mod recommender;
pub mod similarity;
pub mod stopwords;
pub mod tags;
pub mod vectorizer;

pub use posters::{PosterProvider, PosterService};
pub use recommender::{RecommendError, Recommender};

use stopwords::StopWords;

/// Options shared by the tag builder and the similarity index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Vocabulary size, ranked by document frequency
    pub max_vocabulary_size: usize,
    pub stop_words: StopWords,
    /// Lead cast members contributing tags
    pub cast_limit: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_vocabulary_size: 5000,
            stop_words: StopWords::English,
            cast_limit: 3,
        }
    }
}
