use serde::{Deserialize, Serialize};

/// A merged movies/credits row with every required field present.
///
/// The structured fields still hold their text encoding (JSON arrays of objects)
/// exactly as they appear in the TMDB CSV files.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMovie {
    pub movie_id: i64,
    pub title: String,
    pub overview: String,
    pub genres: String,
    pub keywords: String,
    pub cast: String,
    pub crew: String,
}

/// An entry of the `genres`, `keywords` and `cast` arrays
#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntity {
    pub name: String,
}

/// An entry of the `crew` array
#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

/// Typed metadata for one movie, produced by parsing a [`RawMovie`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieMetadata {
    pub id: i64,
    pub title: String,
    pub overview_words: Vec<String>,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    /// Lead cast, already truncated to the configured limit
    pub cast: Vec<String>,
    pub director: Option<String>,
}

/// A catalog entry: the lookup key plus the tag sequence it is indexed by
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub tags: Vec<String>,
}

impl MovieRecord {
    pub fn new(id: i64, title: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tags,
        }
    }

    /// Tags joined into the single document the vectorizer consumes
    pub fn document(&self) -> String {
        self.tags.join(" ")
    }
}
