/// OMDb poster provider
///
/// Looks a movie up by exact title (`GET /?t={title}&apikey={key}`) and returns
/// the `Poster` field. OMDb answers unknown titles with HTTP 200 and
/// `"Response": "False"`, which is a miss rather than an error.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::OmdbResponse,
    services::posters::PosterProvider,
};

const NOT_FOUND_MARKER: &str = "not found";

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Interpret a decoded OMDb body
    fn poster_from_response(title: &str, response: OmdbResponse) -> AppResult<Option<String>> {
        if response.is_failure() {
            let error = response.error.unwrap_or_default();
            if error.to_lowercase().contains(NOT_FOUND_MARKER) {
                tracing::debug!(title = %title, "OMDb has no entry for title");
                return Ok(None);
            }
            return Err(AppError::ExternalApi(format!("OMDb lookup failed: {}", error)));
        }

        Ok(response.poster_url().map(str::to_string))
    }
}

#[async_trait::async_trait]
impl PosterProvider for OmdbProvider {
    async fn fetch_poster(&self, title: &str) -> AppResult<Option<String>> {
        let url = format!("{}/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let body: OmdbResponse = response.json().await?;
        Self::poster_from_response(title, body)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
