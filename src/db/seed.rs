//! MovieLens 100k loader
//!
//! Reads the `u.user`, `u.item` and `u.data` files shipped with the dataset
//! into a [`Dataset`] that any [`RatingStore`](super::RatingStore) can import.

use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder};

use crate::{
    error::{AppError, AppResult},
    models::{Dataset, Movie, Rating, ScoreScale, User},
};

pub const USERS_FILE: &str = "u.user";
pub const MOVIES_FILE: &str = "u.item";
pub const RATINGS_FILE: &str = "u.data";

const RELEASE_DATE_FORMAT: &str = "%d-%b-%Y";

/// `user_id|age|gender|occupation|zipcode`
type UserRow = (i32, i32, String, String, String);

/// `user_id\tmovie_id\tscore\ttimestamp`
type RatingRow = (i32, i32, i32, i64);

fn reader<R: Read>(source: R, delimiter: u8) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(source)
}

/// Parses `u.user`
pub fn parse_users<R: Read>(source: R) -> AppResult<Vec<User>> {
    let mut users = Vec::new();
    for row in reader(source, b'|').deserialize::<UserRow>() {
        let (user_id, age, _gender, _occupation, zipcode) = row?;
        users.push(User {
            user_id,
            email: None,
            age: Some(age),
            zipcode: Some(zipcode),
        });
    }
    Ok(users)
}

/// Parses `u.item`, which is Latin-1 encoded
pub fn parse_movies<R: Read>(source: R) -> AppResult<Vec<Movie>> {
    let mut movies = Vec::new();
    let mut csv = reader(source, b'|');
    let mut record = ByteRecord::new();

    while csv.read_byte_record(&mut record)? {
        let field = |index: usize| record.get(index).map(latin1).unwrap_or_default();

        let movie_id = field(0).trim().parse::<i32>().map_err(|e| {
            AppError::InvalidInput(format!("Invalid movie id {:?}: {}", field(0), e))
        })?;

        let released = field(2);
        let released_at = if released.trim().is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(released.trim(), RELEASE_DATE_FORMAT).map_err(|e| {
                    AppError::InvalidInput(format!(
                        "Invalid release date {:?} for movie {}: {}",
                        released, movie_id, e
                    ))
                })?,
            )
        };

        movies.push(Movie {
            movie_id,
            title: strip_year(&field(1)).to_string(),
            released_at,
            imdb_url: field(4),
        });

        if movies.len() % 100 == 0 {
            tracing::debug!(parsed = movies.len(), "Parsing movies");
        }
    }
    Ok(movies)
}

/// Parses `u.data`, rejecting scores outside `scale`
pub fn parse_ratings<R: Read>(source: R, scale: ScoreScale) -> AppResult<Vec<Rating>> {
    let mut ratings = Vec::new();
    for row in reader(source, b'\t').deserialize::<RatingRow>() {
        let (user_id, movie_id, score, _timestamp) = row?;
        if !scale.contains(score) {
            return Err(AppError::InvalidInput(format!(
                "Score {} by user {} for movie {} is outside {}..={}",
                score, user_id, movie_id, scale.min, scale.max
            )));
        }
        ratings.push(Rating::new(user_id, movie_id, score));

        if ratings.len() % 10_000 == 0 {
            tracing::debug!(parsed = ratings.len(), "Parsing ratings");
        }
    }
    Ok(ratings)
}

/// Loads all three MovieLens files from `dir`
pub fn load_dataset(dir: impl AsRef<Path>, scale: ScoreScale) -> AppResult<Dataset> {
    let dir = dir.as_ref();
    tracing::info!(dir = %dir.display(), "Loading MovieLens dataset");

    let users = parse_users(File::open(dir.join(USERS_FILE))?)?;
    let movies = parse_movies(File::open(dir.join(MOVIES_FILE))?)?;
    let ratings = parse_ratings(File::open(dir.join(RATINGS_FILE))?, scale)?;

    tracing::info!(
        users = users.len(),
        movies = movies.len(),
        ratings = ratings.len(),
        "MovieLens dataset loaded"
    );

    Ok(Dataset {
        users,
        movies,
        ratings,
    })
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Drops a trailing ` (1995)` style release year from a title
fn strip_year(title: &str) -> &str {
    let trimmed = title.trim_end();
    if let Some(open) = trimmed.rfind(" (") {
        let year = &trimmed[open + 2..];
        if year.len() == 5 && year.ends_with(')') && year[..4].bytes().all(|b| b.is_ascii_digit()) {
            return &trimmed[..open];
        }
    }
    trimmed
}
