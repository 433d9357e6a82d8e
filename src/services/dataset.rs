//! TMDB dataset loading.
//!
//! Reads the movies and credits CSV files, inner-joins them on `title` and drops
//! rows that are missing any field the tag builder needs.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::RawMovie,
};

/// Columns used from `tmdb_5000_movies.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRow {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
}

/// Columns of `tmdb_5000_credits.csv`
#[derive(Debug, Clone, Deserialize)]
pub struct CreditRow {
    #[serde(deserialize_with = "csv::invalid_option")]
    pub movie_id: Option<i64>,
    pub title: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// Merged table plus what was left out of it
#[derive(Debug, Default)]
pub struct MergeReport {
    pub rows: Vec<RawMovie>,
    /// Joined rows dropped for a missing field
    pub incomplete: usize,
    /// CSV records that could not be decoded
    pub unreadable: usize,
}

/// Records that fail to decode are skipped with a warning; I/O errors abort.
fn read_rows<T, R>(reader: R, source: &str) -> AppResult<(Vec<T>, usize)>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    let mut unreadable = 0;

    for result in csv_reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(source, error = %e, "Skipping unreadable CSV record");
                unreadable += 1;
            }
        }
    }

    Ok((rows, unreadable))
}

pub fn read_movies<R: Read>(reader: R) -> AppResult<(Vec<MovieRow>, usize)> {
    read_rows(reader, "movies")
}

pub fn read_credits<R: Read>(reader: R) -> AppResult<(Vec<CreditRow>, usize)> {
    read_rows(reader, "credits")
}

fn present(field: &Option<String>) -> Option<String> {
    field.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

fn complete(movie: &MovieRow, credit: &CreditRow) -> Option<RawMovie> {
    Some(RawMovie {
        movie_id: credit.movie_id?,
        title: present(&credit.title)?,
        overview: present(&movie.overview)?,
        genres: present(&movie.genres)?,
        keywords: present(&movie.keywords)?,
        cast: present(&credit.cast)?,
        crew: present(&credit.crew)?,
    })
}

/// Inner join on title.
///
/// Output follows movie order; a movie matching several credit rows yields one
/// row per match, in credit order.
pub fn merge(movies: &[MovieRow], credits: &[CreditRow]) -> MergeReport {
    let mut credits_by_title: HashMap<&str, Vec<&CreditRow>> = HashMap::new();
    for credit in credits {
        if let Some(title) = credit.title.as_deref() {
            credits_by_title.entry(title).or_default().push(credit);
        }
    }

    let mut report = MergeReport::default();
    for movie in movies {
        let Some(matches) = movie.title.as_deref().and_then(|t| credits_by_title.get(t)) else {
            continue;
        };
        for credit in matches {
            match complete(movie, credit) {
                Some(row) => report.rows.push(row),
                None => report.incomplete += 1,
            }
        }
    }

    report
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path)
        .map_err(|e| AppError::Dataset(format!("cannot open {}: {}", path.display(), e)))
}

/// Load and merge both CSV files
pub fn load(movies_path: impl AsRef<Path>, credits_path: impl AsRef<Path>) -> AppResult<MergeReport> {
    let (movies, unreadable_movies) = read_movies(open(movies_path.as_ref())?)?;
    let (credits, unreadable_credits) = read_credits(open(credits_path.as_ref())?)?;

    let mut report = merge(&movies, &credits);
    report.unreadable = unreadable_movies + unreadable_credits;

    tracing::info!(
        movies = movies.len(),
        credits = credits.len(),
        merged = report.rows.len(),
        incomplete = report.incomplete,
        unreadable = report.unreadable,
        "Loaded TMDB dataset"
    );

    Ok(report)
}
