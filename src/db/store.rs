//! Rating storage abstraction
//!
//! The prediction engine only ever reads through this trait. Backends own
//! persistence and return owned snapshots, so a computation never observes a
//! write that lands halfway through it.

use crate::{
    error::AppResult,
    models::{Dataset, Movie, MovieId, Rating, User, UserId},
};

/// Trait for rating stores
///
/// Lookups distinguish "unknown id" (`None`) from "known but without ratings"
/// (`Some(vec![])`). Ratings come back in the order they were first recorded.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingStore: Send + Sync {
    /// All users, ordered by id
    async fn users(&self) -> AppResult<Vec<User>>;

    async fn user(&self, user_id: UserId) -> AppResult<Option<User>>;

    async fn movie(&self, movie_id: MovieId) -> AppResult<Option<Movie>>;

    /// Every rating the user authored, or `None` if the user does not exist
    async fn ratings_of_user(&self, user_id: UserId) -> AppResult<Option<Vec<Rating>>>;

    /// Every rating the movie received, or `None` if the movie does not exist
    async fn ratings_of_movie(&self, movie_id: MovieId) -> AppResult<Option<Vec<Rating>>>;

    /// Records a rating, replacing any earlier score by the same user for the same movie
    ///
    /// Fails with `NotFound` when either the user or the movie is unknown.
    async fn upsert_rating(&self, rating: Rating) -> AppResult<Rating>;

    /// Bulk-loads users, movies and ratings
    async fn import(&self, dataset: Dataset) -> AppResult<()>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
