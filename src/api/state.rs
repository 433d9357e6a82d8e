use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::services::{PosterService, Recommender};

/// Shared application state.
///
/// Everything here is built once at startup and only read by handlers, so it
/// is shared without locks.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub posters: PosterService,
    pub limits: RecommendationLimits,
    pub loaded_at: DateTime<Utc>,
}

/// Bounds on the number of recommendations per request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationLimits {
    pub default_k: usize,
    pub max_k: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            default_k: 5,
            max_k: 50,
        }
    }
}

impl AppState {
    pub fn new(recommender: Recommender, posters: PosterService, limits: RecommendationLimits) -> Self {
        Self {
            recommender: Arc::new(recommender),
            posters,
            limits,
            loaded_at: Utc::now(),
        }
    }
}
