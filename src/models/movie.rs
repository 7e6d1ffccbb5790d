use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type MovieId = i32;

/// A movie listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    pub released_at: Option<NaiveDate>,
    pub imdb_url: String,
}

impl Movie {
    /// Creates a movie with only a title
    pub fn new(movie_id: MovieId, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            released_at: None,
            imdb_url: String::new(),
        }
    }
}
