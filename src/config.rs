use serde::Deserialize;

use crate::services::{stopwords::StopWords, IndexOptions};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the TMDB movies CSV (overview, genres, keywords)
    #[serde(default = "default_movies_csv")]
    pub movies_csv: String,

    /// Path to the TMDB credits CSV (cast, crew)
    #[serde(default = "default_credits_csv")]
    pub credits_csv: String,

    /// Number of tokens kept in the vocabulary
    #[serde(default = "default_max_vocabulary_size")]
    pub max_vocabulary_size: usize,

    /// `english`, `none`, or a comma-separated list of custom stop words
    #[serde(default = "default_stop_words")]
    pub stop_words: String,

    /// Number of lead cast members contributing tags
    #[serde(default = "default_cast_limit")]
    pub cast_limit: usize,

    /// Recommendations returned when the request does not ask for a count
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Upper bound accepted for a requested recommendation count
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Fail at startup instead of resolving duplicate titles to their first row
    #[serde(default)]
    pub reject_duplicate_titles: bool,

    /// OMDb API key; without one every poster is the placeholder
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Image URL returned when no poster can be found
    #[serde(default = "default_poster_placeholder_url")]
    pub poster_placeholder_url: String,

    /// Maximum number of poster lookups in flight at once
    #[serde(default = "default_poster_concurrency")]
    pub poster_concurrency: usize,

    /// Timeout for a single poster lookup
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Redis connection URL for the poster cache (disabled when unset)
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Poster cache TTL in seconds
    #[serde(default = "default_poster_cache_ttl_secs")]
    pub poster_cache_ttl_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_csv() -> String {
    "data/tmdb_5000_movies.csv".to_string()
}

fn default_credits_csv() -> String {
    "data/tmdb_5000_credits.csv".to_string()
}

fn default_max_vocabulary_size() -> usize {
    5000
}

fn default_stop_words() -> String {
    "english".to_string()
}

fn default_cast_limit() -> usize {
    3
}

fn default_recommendations() -> usize {
    5
}

fn default_max_recommendations() -> usize {
    50
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_poster_placeholder_url() -> String {
    "https://via.placeholder.com/150".to_string()
}

fn default_poster_concurrency() -> usize {
    8
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_poster_cache_ttl_secs() -> u64 {
    604800 // 1 week
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Options for the tag builder and similarity index
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            max_vocabulary_size: self.max_vocabulary_size,
            stop_words: StopWords::from_config_str(&self.stop_words),
            cast_limit: self.cast_limit,
        }
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
