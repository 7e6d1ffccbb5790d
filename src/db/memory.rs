use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Dataset, Movie, MovieId, Rating, User, UserId},
};

use super::RatingStore;

#[derive(Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    movies: BTreeMap<MovieId, Movie>,
    /// Ratings in insertion order; an upsert rewrites the score in place
    ratings: Vec<Rating>,
    /// (user, movie) -> index into `ratings`
    index: HashMap<(UserId, MovieId), usize>,
    /// Positions in `ratings`, ascending, per author and per movie
    by_user: HashMap<UserId, Vec<usize>>,
    by_movie: HashMap<MovieId, Vec<usize>>,
}

impl Inner {
    fn upsert(&mut self, rating: Rating) {
        match self.index.get(&(rating.user_id, rating.movie_id)) {
            Some(&position) => self.ratings[position] = rating,
            None => {
                let position = self.ratings.len();
                self.index.insert((rating.user_id, rating.movie_id), position);
                self.by_user.entry(rating.user_id).or_default().push(position);
                self.by_movie.entry(rating.movie_id).or_default().push(position);
                self.ratings.push(rating);
            }
        }
    }

    fn ratings_at(&self, positions: Option<&Vec<usize>>) -> Vec<Rating> {
        positions
            .map(|positions| positions.iter().map(|&p| self.ratings[p]).collect())
            .unwrap_or_default()
    }
}

/// Rating store held entirely in process memory
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RatingStore for InMemoryStore {
    async fn users(&self) -> AppResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().cloned().collect())
    }

    async fn user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&user_id).cloned())
    }

    async fn movie(&self, movie_id: MovieId) -> AppResult<Option<Movie>> {
        let inner = self.inner.read().await;
        Ok(inner.movies.get(&movie_id).cloned())
    }

    async fn ratings_of_user(&self, user_id: UserId) -> AppResult<Option<Vec<Rating>>> {
        let inner = self.inner.read().await;
        if !inner.users.contains_key(&user_id) {
            return Ok(None);
        }
        Ok(Some(inner.ratings_at(inner.by_user.get(&user_id))))
    }

    async fn ratings_of_movie(&self, movie_id: MovieId) -> AppResult<Option<Vec<Rating>>> {
        let inner = self.inner.read().await;
        if !inner.movies.contains_key(&movie_id) {
            return Ok(None);
        }
        Ok(Some(inner.ratings_at(inner.by_movie.get(&movie_id))))
    }

    async fn upsert_rating(&self, rating: Rating) -> AppResult<Rating> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&rating.user_id) {
            return Err(AppError::NotFound(format!("User {}", rating.user_id)));
        }
        if !inner.movies.contains_key(&rating.movie_id) {
            return Err(AppError::NotFound(format!("Movie {}", rating.movie_id)));
        }
        inner.upsert(rating);
        Ok(rating)
    }

    async fn import(&self, dataset: Dataset) -> AppResult<()> {
        let mut inner = self.inner.write().await;

        for user in dataset.users {
            inner.users.insert(user.user_id, user);
        }
        for movie in dataset.movies {
            inner.movies.insert(movie.movie_id, movie);
        }
        for rating in dataset.ratings {
            if !inner.users.contains_key(&rating.user_id)
                || !inner.movies.contains_key(&rating.movie_id)
            {
                return Err(AppError::InvalidInput(format!(
                    "Rating references unknown user {} or movie {}",
                    rating.user_id, rating.movie_id
                )));
            }
            inner.upsert(rating);
        }

        tracing::info!(
            users = inner.users.len(),
            movies = inner.movies.len(),
            ratings = inner.ratings.len(),
            "Dataset imported into memory"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
