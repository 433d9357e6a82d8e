use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{CrewMember, MovieMetadata, MovieRecord, NamedEntity, RawMovie};

/// A title paired with the image shown for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poster {
    pub title: String,
    pub poster_url: String,
}

/// A ranked recommendation with its similarity to the query movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredMovie {
    pub id: i64,
    pub title: String,
    pub score: f64,
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Value OMDb uses for absent fields
pub const OMDB_NOT_AVAILABLE: &str = "N/A";

/// Raw API response from `GET /?t={title}`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OmdbResponse {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    /// `"True"` or `"False"`
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbResponse {
    /// Whether OMDb reported the lookup as failed
    pub fn is_failure(&self) -> bool {
        self.response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"))
    }

    /// The poster URL, unless OMDb has none for this title
    pub fn poster_url(&self) -> Option<&str> {
        self.poster
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != OMDB_NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omdb_response_with_poster() {
        let json = r#"{
            "Title": "Avatar",
            "Year": "2009",
            "Poster": "https://m.media-amazon.com/images/avatar.jpg",
            "Response": "True"
        }"#;
        let response: OmdbResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_failure());
        assert_eq!(
            response.poster_url(),
            Some("https://m.media-amazon.com/images/avatar.jpg")
        );
    }

    #[test]
    fn test_omdb_response_poster_not_available() {
        let json = r#"{"Title": "Obscure", "Poster": "N/A", "Response": "True"}"#;
        let response: OmdbResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.poster_url(), None);
    }

    #[test]
    fn test_omdb_response_failure() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let response: OmdbResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_failure());
        assert_eq!(response.poster_url(), None);
        assert_eq!(response.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_poster_serialization() {
        let poster = Poster {
            title: "Avatar".to_string(),
            poster_url: "https://via.placeholder.com/150".to_string(),
        };
        let json = serde_json::to_value(&poster).unwrap();
        assert_eq!(json["title"], "Avatar");
        assert_eq!(json["poster_url"], "https://via.placeholder.com/150");
    }
}
