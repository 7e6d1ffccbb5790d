use std::collections::HashMap;

use crate::{
    db::RatingStore,
    error::{AppError, AppResult},
    models::{MovieId, Prediction, UserId, UserRatings, WeightedVote},
    services::similarity::similarity,
};

/// A rating of the target movie together with everything its author rated
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub score: i32,
    pub ratings: &'a UserRatings,
}

/// Scores every neighbour against the target user, most similar first
///
/// Neighbours authored by the target user themselves are skipped. The sort
/// is stable, so equally similar neighbours keep their input order.
pub fn weighted_votes<'a>(
    target: &UserRatings,
    neighbors: impl IntoIterator<Item = Neighbor<'a>>,
) -> Vec<WeightedVote> {
    let mut votes: Vec<WeightedVote> = neighbors
        .into_iter()
        .filter(|n| n.ratings.user_id != target.user_id)
        .map(|n| WeightedVote {
            user_id: n.ratings.user_id,
            similarity: similarity(target, n.ratings),
            score: n.score,
        })
        .collect();

    votes.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    votes
}

/// Similarity-weighted mean of the votes with positive similarity
///
/// Zero and negative correlations never contribute. Returns `None` when no
/// vote is left, otherwise `Σ(score × sim) / Σ(sim)`, unrounded.
pub fn weighted_mean(votes: &[WeightedVote]) -> Option<f64> {
    let (numerator, denominator) = votes
        .iter()
        .filter(|v| v.similarity > 0.0)
        .fold((0.0, 0.0), |(num, den), v| {
            (num + f64::from(v.score) * v.similarity, den + v.similarity)
        });

    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Estimates the score `target` would give a movie from the movie's other raters
pub fn predict<'a>(
    target: &UserRatings,
    neighbors: impl IntoIterator<Item = Neighbor<'a>>,
) -> Option<f64> {
    weighted_mean(&weighted_votes(target, neighbors))
}

async fn load_user_ratings(store: &dyn RatingStore, user_id: UserId) -> AppResult<UserRatings> {
    let ratings = store
        .ratings_of_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
    Ok(UserRatings::from_ratings(user_id, &ratings))
}

/// Similarity between two stored users
pub async fn compare_users(
    store: &dyn RatingStore,
    user_id: UserId,
    other_id: UserId,
) -> AppResult<f64> {
    let first = load_user_ratings(store, user_id).await?;
    let second = load_user_ratings(store, other_id).await?;
    Ok(similarity(&first, &second))
}

/// Predicts a stored user's score for a stored movie
///
/// Every rating of the movie by another user is a candidate; its author's
/// ratings are loaded so the author can be compared with the target. An
/// author the store cannot resolve is reported as `UnresolvedRater`.
#[tracing::instrument(skip(store), fields(store = store.name()))]
pub async fn predict_rating(
    store: &dyn RatingStore,
    user_id: UserId,
    movie_id: MovieId,
) -> AppResult<Prediction> {
    let target = load_user_ratings(store, user_id).await?;

    let movie_ratings = store
        .ratings_of_movie(movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {}", movie_id)))?;

    let mut authors: HashMap<UserId, UserRatings> = HashMap::new();
    for rating in movie_ratings.iter().filter(|r| r.user_id != user_id) {
        let author = store
            .ratings_of_user(rating.user_id)
            .await?
            .ok_or(AppError::UnresolvedRater(rating.user_id))?;
        authors.insert(
            rating.user_id,
            UserRatings::from_ratings(rating.user_id, &author),
        );
    }

    let neighbors = movie_ratings.iter().filter_map(|r| {
        authors.get(&r.user_id).map(|ratings| Neighbor {
            score: r.score,
            ratings,
        })
    });
    let votes = weighted_votes(&target, neighbors);
    let contributors = votes.iter().filter(|v| v.similarity > 0.0).count();
    let score = weighted_mean(&votes);

    tracing::debug!(
        candidates = votes.len(),
        contributors,
        "Neighbours scored"
    );

    match score {
        Some(score) => tracing::info!(score, contributors, "Rating predicted"),
        None => tracing::info!(
            candidates = votes.len(),
            "No positively correlated neighbour, no prediction"
        ),
    }

    Ok(Prediction {
        user_id,
        movie_id,
        score,
        candidates: votes.len(),
        contributors,
    })
}
