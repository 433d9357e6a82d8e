pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use api::{create_router, AppState, RecommendationLimits};
use config::Config;
use services::{
    catalog::{self, DuplicateTitles},
    posters::{OmdbProvider, PlaceholderProvider},
    PosterProvider, PosterService,
};

/// Build the poster service described by `config`
pub fn poster_service(config: &Config) -> anyhow::Result<(PosterService, Option<cache::CacheWriterHandle>)> {
    let provider: Arc<dyn PosterProvider> = match &config.omdb_api_key {
        Some(key) if !key.trim().is_empty() => Arc::new(OmdbProvider::new(
            key.clone(),
            config.omdb_api_url.clone(),
            Duration::from_secs(config.poster_timeout_secs),
        )?),
        _ => {
            tracing::warn!("OMDB_API_KEY not set, every poster will be the placeholder");
            Arc::new(PlaceholderProvider)
        }
    };

    let mut service = PosterService::new(provider.clone(), config.poster_placeholder_url.clone())
        .with_concurrency(config.poster_concurrency);

    let mut writer = None;
    match &config.redis_url {
        Some(_) if !provider.caches_results() => {
            tracing::info!(
                provider = provider.name(),
                "REDIS_URL ignored, poster results are not cacheable"
            );
        }
        Some(redis_url) => {
            let client = cache::create_redis_client(redis_url)?;
            let (cache, handle) = cache::Cache::new(client);
            service = service.with_cache(cache, config.poster_cache_ttl_secs);
            writer = Some(handle);
            tracing::info!("Poster cache enabled");
        }
        None => {}
    }

    Ok((service, writer))
}

/// Load the catalog, build the index and serve the API until shutdown
pub async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        movies_csv = %config.movies_csv,
        credits_csv = %config.credits_csv,
        "Building recommendation index"
    );

    let options = config.index_options();
    let duplicates = if config.reject_duplicate_titles {
        DuplicateTitles::Reject
    } else {
        DuplicateTitles::FirstWins
    };
    let movies_csv = config.movies_csv.clone();
    let credits_csv = config.credits_csv.clone();
    let recommender = tokio::task::spawn_blocking(move || {
        catalog::load_recommender(movies_csv, credits_csv, &options, duplicates)
    })
    .await??;

    let (posters, cache_writer) = poster_service(&config)?;
    let limits = RecommendationLimits {
        default_k: config.default_recommendations,
        max_k: config.max_recommendations,
    };
    let app = create_router(AppState::new(recommender, posters, limits));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
