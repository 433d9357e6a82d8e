use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::Poster,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub movie: String,
    #[serde(default)]
    pub k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    #[serde(default)]
    pub k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Poster>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub movies: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostersQuery {
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostersResponse {
    pub posters: Vec<Poster>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub movies: usize,
    pub vocabulary: usize,
    pub loaded_at: DateTime<Utc>,
}

fn resolve_k(state: &AppState, k: Option<usize>) -> AppResult<usize> {
    let k = k.unwrap_or(state.limits.default_k);
    if k > state.limits.max_k {
        return Err(AppError::InvalidInput(format!(
            "k must be at most {}, got {}",
            state.limits.max_k, k
        )));
    }
    Ok(k)
}

// Handlers

/// Health check with catalog stats
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        movies: state.recommender.len(),
        vocabulary: state.recommender.vocabulary_size(),
        loaded_at: state.loaded_at,
    })
}

/// All catalog titles in table order
pub async fn get_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    Json(MoviesResponse {
        movies: state.recommender.titles(),
    })
}

/// Recommendations for a title, enriched with posters
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let title = request.movie.as_str();
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("movie title cannot be empty".to_string()));
    }
    let k = resolve_k(&state, request.k)?;

    tracing::info!(request_id = %request_id, movie = %title, k, "Processing recommendation request");

    let titles = state.recommender.recommend(title, k).map_err(|e| {
        tracing::info!(request_id = %request_id, movie = %title, "Movie not in catalog");
        AppError::from(e)
    })?;

    let recommendations = state.posters.posters_for(titles).await;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendation completed"
    );

    Ok(Json(RecommendResponse { recommendations }))
}

/// Recommendations for a movie chosen by id
pub async fn recommend_by_id(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Query(query): Query<RecommendQuery>,
) -> AppResult<Json<RecommendResponse>> {
    let k = resolve_k(&state, query.k)?;

    tracing::info!(request_id = %request_id, movie_id = id, k, "Processing recommendation request");

    let titles = state
        .recommender
        .recommend_by_id(id, k)?
        .into_iter()
        .map(|m| m.title)
        .collect();

    let recommendations = state.posters.posters_for(titles).await;
    Ok(Json(RecommendResponse { recommendations }))
}

/// Posters for the catalog, optionally paged
pub async fn get_posters(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<PostersQuery>,
) -> Json<PostersResponse> {
    let offset = query.offset.unwrap_or(0);
    let titles: Vec<String> = state
        .recommender
        .titles()
        .into_iter()
        .skip(offset)
        .take(query.limit.unwrap_or(usize::MAX))
        .collect();

    tracing::info!(request_id = %request_id, offset, count = titles.len(), "Fetching catalog posters");

    let posters = state.posters.posters_for(titles).await;
    Json(PostersResponse { posters })
}
