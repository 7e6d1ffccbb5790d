use serde::{Deserialize, Serialize};

pub mod movie;
pub mod rating;
pub mod user;

pub use movie::{Movie, MovieId};
pub use rating::{PairedRatingSample, Rating, ScoreScale, UserRatings, WeightedVote};
pub use user::{User, UserId};

/// Outcome of a rating prediction for one (user, movie) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Similarity-weighted mean of the neighbours' scores, unrounded.
    /// `None` when no rater of the movie correlates positively with the user.
    pub score: Option<f64>,
    /// Ratings of the movie by other users that were considered
    pub candidates: usize,
    /// Neighbours with positive similarity that contributed to `score`
    pub contributors: usize,
}

/// Users, movies and ratings loaded together, e.g. from a MovieLens export
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub movies: Vec<Movie>,
    pub ratings: Vec<Rating>,
}
