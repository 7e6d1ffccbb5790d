use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{MovieId, UserId};

/// A score a user gave a movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub score: i32,
}

impl Rating {
    pub fn new(user_id: UserId, movie_id: MovieId, score: i32) -> Self {
        Self {
            user_id,
            movie_id,
            score,
        }
    }
}

/// Inclusive bounds of the integer rating scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreScale {
    pub min: i32,
    pub max: i32,
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl ScoreScale {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Checks if a score lies on the scale
    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// A user's complete set of ratings, keyed by movie
///
/// The map keeps at most one score per movie, so a snapshot built from a
/// store that violated that invariant keeps the last score seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRatings {
    pub user_id: UserId,
    pub ratings: HashMap<MovieId, i32>,
}

impl UserRatings {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ratings: HashMap::new(),
        }
    }

    /// Builds the snapshot from an ordered collection of the user's ratings
    pub fn from_ratings<'a>(user_id: UserId, ratings: impl IntoIterator<Item = &'a Rating>) -> Self {
        Self {
            user_id,
            ratings: ratings.into_iter().map(|r| (r.movie_id, r.score)).collect(),
        }
    }

    /// Adds or replaces the score for a movie
    pub fn rate(&mut self, movie_id: MovieId, score: i32) {
        self.ratings.insert(movie_id, score);
    }

    pub fn score(&self, movie_id: MovieId) -> Option<i32> {
        self.ratings.get(&movie_id).copied()
    }
}

/// Two users' scores for a movie both of them rated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedRatingSample {
    pub first: i32,
    pub second: i32,
}

/// A neighbour's score for the target movie, weighted by similarity to the target user
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedVote {
    pub user_id: UserId,
    pub similarity: f64,
    pub score: i32,
}
