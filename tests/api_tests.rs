use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;

use movie_rec_api::api::{
    create_router, AppState, HealthResponse, MoviesResponse, PostersResponse, RecommendResponse,
    RecommendationLimits,
};
use movie_rec_api::error::{AppError, AppResult};
use movie_rec_api::models::MovieRecord;
use movie_rec_api::services::{
    catalog::{load_recommender, DuplicateTitles},
    IndexOptions, PosterProvider, PosterService, Recommender,
};

const PLACEHOLDER: &str = "https://via.placeholder.com/150";

/// Has a poster for "B" only and fails for "C"
struct StubPosters;

#[async_trait::async_trait]
impl PosterProvider for StubPosters {
    async fn fetch_poster(&self, title: &str) -> AppResult<Option<String>> {
        match title {
            "B" => Ok(Some("https://img.example/b.jpg".to_string())),
            "C" => Err(AppError::ExternalApi("lookup failed".to_string())),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn record(id: i64, title: &str, tags: &[&str]) -> MovieRecord {
    MovieRecord::new(id, title, tags.iter().map(|t| t.to_string()).collect())
}

fn create_test_server() -> TestServer {
    let recommender = Recommender::new(
        vec![
            record(1, "A", &["space", "war"]),
            record(2, "B", &["space", "love"]),
            record(3, "C", &["cooking", "show"]),
        ],
        &IndexOptions::default(),
    );
    let posters = PosterService::new(Arc::new(StubPosters), PLACEHOLDER);
    let limits = RecommendationLimits {
        default_k: 5,
        max_k: 10,
    };

    let app = create_router(AppState::new(recommender, posters, limits));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let health: HealthResponse = response.json();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.movies, 3);
    assert_eq!(health.vocabulary, 4);
}

#[tokio::test]
async fn test_list_movies_in_catalog_order() {
    let server = create_test_server();
    let response = server.get("/movies").await;
    response.assert_status_ok();

    let movies: MoviesResponse = response.json();
    assert_eq!(movies.movies, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_recommend_ranks_shared_tokens_first_with_posters() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "movie": "A", "k": 2 }))
        .await;
    response.assert_status_ok();

    let body: RecommendResponse = response.json();
    let titles: Vec<&str> = body.recommendations.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "C"]);
    assert_eq!(body.recommendations[0].poster_url, "https://img.example/b.jpg");
    // A failed lookup degrades to the placeholder
    assert_eq!(body.recommendations[1].poster_url, PLACEHOLDER);
}

#[tokio::test]
async fn test_recommend_defaults_k_and_excludes_query() {
    let server = create_test_server();
    let response = server.post("/recommend").json(&json!({ "movie": "B" })).await;
    response.assert_status_ok();

    let body: RecommendResponse = response.json();
    assert_eq!(body.recommendations.len(), 2);
    assert!(body.recommendations.iter().all(|p| p.title != "B"));
}

#[tokio::test]
async fn test_recommend_unknown_title_is_not_found() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "movie": "Unknown Title", "k": 5 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Unknown Title"));
}

#[tokio::test]
async fn test_recommend_rejects_k_above_limit() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "movie": "A", "k": 11 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_rejects_empty_title() {
    let server = create_test_server();
    let response = server.post("/recommend").json(&json!({ "movie": "  " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_title_match_is_exact() {
    let server = create_test_server();
    let response = server
        .post("/recommend")
        .json(&json!({ "movie": " A", "k": 2 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recommend_by_id() {
    let server = create_test_server();
    let response = server.get("/movies/2/recommendations").add_query_param("k", 1).await;
    response.assert_status_ok();

    let body: RecommendResponse = response.json();
    assert_eq!(body.recommendations.len(), 1);
    assert_eq!(body.recommendations[0].title, "A");

    let response = server.get("/movies/999/recommendations").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_posters_for_catalog_with_paging() {
    let server = create_test_server();

    let response = server.get("/posters").await;
    response.assert_status_ok();
    let all: PostersResponse = response.json();
    assert_eq!(all.posters.len(), 3);
    assert_eq!(all.posters[0].poster_url, PLACEHOLDER);
    assert_eq!(all.posters[1].poster_url, "https://img.example/b.jpg");

    let response = server
        .get("/posters")
        .add_query_param("offset", 1)
        .add_query_param("limit", 1)
        .await;
    let page: PostersResponse = response.json();
    assert_eq!(page.posters.len(), 1);
    assert_eq!(page.posters[0].title, "B");
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let server = create_test_server();
    let id = "6f1c2a4e-5b7d-4c1e-9a3f-2d8e7b6a5c4d";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());
}

#[test]
fn test_catalog_from_fixture_files() {
    let recommender = load_recommender(
        "tests/fixtures/movies.csv",
        "tests/fixtures/credits.csv",
        &IndexOptions::default(),
        DuplicateTitles::Reject,
    )
    .unwrap();

    // "No Overview" is incomplete and "Broken Genres" has malformed metadata
    assert_eq!(
        recommender.titles(),
        vec!["Avatar", "Interstellar", "Alien", "Ratatouille"]
    );

    let similar = recommender.recommend("Avatar", 3).unwrap();
    assert_eq!(similar.len(), 3);
    assert_eq!(similar[0], "Alien");
    assert_eq!(similar[2], "Ratatouille");

    let avatar = &recommender.records()[0];
    assert!(avatar.tags.ends_with(&[
        "SamWorthington".to_string(),
        "ZoeSaldana".to_string(),
        "SigourneyWeaver".to_string(),
        "JamesCameron".to_string(),
    ]));

    // No director credited: crew contributes nothing
    let ratatouille = &recommender.records()[3];
    assert_eq!(ratatouille.tags.last().map(String::as_str), Some("PattonOswalt"));
}

#[tokio::test]
async fn test_placeholder_posters_ignore_redis_url() {
    let config = movie_rec_api::config::Config::from_vars(vec![(
        "REDIS_URL".to_string(),
        "redis://127.0.0.1:1".to_string(),
    )])
    .unwrap();

    let (posters, writer) = movie_rec_api::poster_service(&config).unwrap();
    assert!(!posters.is_cached());
    assert!(writer.is_none());
}
