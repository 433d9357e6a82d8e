//! Startup assembly of the recommender: dataset → tags → similarity index.

use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::RawMovie,
};

use super::{dataset, tags, IndexOptions, Recommender};

/// What to do when several rows share a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateTitles {
    /// Keep all rows; title lookups resolve to the first one
    #[default]
    FirstWins,
    /// Refuse to build the catalog
    Reject,
}

/// Build tags for `rows` and index them.
pub fn build_recommender(
    rows: Vec<RawMovie>,
    options: &IndexOptions,
    duplicates: DuplicateTitles,
) -> AppResult<Recommender> {
    let report = tags::build_records(rows, options.cast_limit);
    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "Some movies were left out of the catalog"
        );
    }

    let recommender = Recommender::new(report.records, options);

    let duplicate_titles = recommender.duplicate_titles();
    if !duplicate_titles.is_empty() {
        match duplicates {
            DuplicateTitles::FirstWins => tracing::warn!(
                count = duplicate_titles.len(),
                titles = ?duplicate_titles,
                "Duplicate titles in catalog, title lookups use the first row"
            ),
            DuplicateTitles::Reject => {
                return Err(AppError::Dataset(format!(
                    "duplicate titles in catalog: {}",
                    duplicate_titles.join(", ")
                )))
            }
        }
    }

    tracing::info!(
        movies = recommender.len(),
        vocabulary = recommender.vocabulary_size(),
        "Similarity index built"
    );

    Ok(recommender)
}

/// Load the TMDB files and build the recommender from them
pub fn load_recommender(
    movies_csv: impl AsRef<Path>,
    credits_csv: impl AsRef<Path>,
    options: &IndexOptions,
    duplicates: DuplicateTitles,
) -> AppResult<Recommender> {
    let report = dataset::load(movies_csv, credits_csv)?;
    build_recommender(report.rows, options, duplicates)
}
