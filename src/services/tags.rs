//! Tag construction: raw TMDB metadata to a flat token sequence per movie.
//!
//! Parsing and tag assembly are separate steps. [`parse_metadata`] validates the
//! structured fields of one row into a [`MovieMetadata`]; [`tags_for`] turns that
//! into the ordered tag sequence. [`build_records`] runs both over a whole table,
//! skipping (and reporting) rows whose metadata cannot be parsed.

use serde::de::DeserializeOwned;

use crate::models::{CrewMember, MovieMetadata, MovieRecord, NamedEntity, RawMovie};

const DIRECTOR_JOB: &str = "Director";

/// A structured field that could not be parsed
#[derive(thiserror::Error, Debug)]
#[error("malformed `{field}` field: {source}")]
pub struct MetadataError {
    pub field: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// A row left out of the catalog, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub movie_id: i64,
    pub title: String,
    pub reason: String,
}

/// Result of building tags for a whole table
#[derive(Debug, Default)]
pub struct TagReport {
    pub records: Vec<MovieRecord>,
    pub skipped: Vec<SkippedRow>,
}

fn parse_field<T: DeserializeOwned>(field: &'static str, raw: &str) -> Result<Vec<T>, MetadataError> {
    serde_json::from_str(raw).map_err(|source| MetadataError { field, source })
}

fn names(entities: Vec<NamedEntity>) -> Vec<String> {
    entities.into_iter().map(|e| e.name).collect()
}

/// Parse a row's structured fields into typed metadata.
///
/// Only the first `cast_limit` cast entries are kept. A crew without a
/// "Director" entry yields `director: None`.
pub fn parse_metadata(raw: &RawMovie, cast_limit: usize) -> Result<MovieMetadata, MetadataError> {
    let genres = names(parse_field("genres", &raw.genres)?);
    let keywords = names(parse_field("keywords", &raw.keywords)?);

    let mut cast: Vec<NamedEntity> = parse_field("cast", &raw.cast)?;
    cast.truncate(cast_limit);

    let crew: Vec<CrewMember> = parse_field("crew", &raw.crew)?;
    let director = crew
        .into_iter()
        .find(|member| member.job.as_deref() == Some(DIRECTOR_JOB))
        .map(|member| member.name);

    Ok(MovieMetadata {
        id: raw.movie_id,
        title: raw.title.clone(),
        overview_words: raw.overview.split_whitespace().map(str::to_string).collect(),
        genres,
        keywords,
        cast: names(cast),
        director,
    })
}

/// Remove every space so a multi-word name becomes a single token
pub fn collapse_spaces(name: &str) -> String {
    name.replace(' ', "")
}

/// Overview words, then genres, keywords, cast and director, in that order.
/// Names are collapsed to single tokens; overview words are kept as they are.
pub fn tags_for(metadata: &MovieMetadata) -> Vec<String> {
    let names = metadata
        .genres
        .iter()
        .chain(&metadata.keywords)
        .chain(&metadata.cast)
        .chain(metadata.director.iter())
        .map(|name| collapse_spaces(name));

    metadata
        .overview_words
        .iter()
        .cloned()
        .chain(names)
        .collect()
}

/// Build catalog records for every row, skipping rows with malformed metadata
pub fn build_records(rows: Vec<RawMovie>, cast_limit: usize) -> TagReport {
    let mut report = TagReport::default();

    for raw in rows {
        match parse_metadata(&raw, cast_limit) {
            Ok(metadata) => {
                let tags = tags_for(&metadata);
                report
                    .records
                    .push(MovieRecord::new(metadata.id, metadata.title, tags));
            }
            Err(e) => {
                tracing::warn!(
                    movie_id = raw.movie_id,
                    title = %raw.title,
                    field = e.field,
                    error = %e.source,
                    "Skipping movie with malformed metadata"
                );
                report.skipped.push(SkippedRow {
                    movie_id: raw.movie_id,
                    title: raw.title,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}
