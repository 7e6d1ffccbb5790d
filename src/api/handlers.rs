use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{Movie, MovieId, Prediction, Rating, User, UserId};
use crate::services::prediction;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub score: i32,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    #[serde(flatten)]
    pub movie: Movie,
    pub rating_count: usize,
    pub average_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub user_id: UserId,
    pub other_id: UserId,
    pub similarity: f64,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Get all users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.store.users().await?))
}

/// Get a single user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
    Ok(Json(user))
}

/// Get every rating a user made
pub async fn user_ratings(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<Rating>>> {
    let ratings = state
        .store
        .ratings_of_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
    Ok(Json(ratings))
}

/// Get a movie with a summary of its ratings
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<MovieResponse>> {
    let movie = state
        .store
        .movie(movie_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {}", movie_id)))?;
    let ratings = state
        .store
        .ratings_of_movie(movie_id)
        .await?
        .unwrap_or_default();

    let average_score = if ratings.is_empty() {
        None
    } else {
        let total: i64 = ratings.iter().map(|r| i64::from(r.score)).sum();
        Some(total as f64 / ratings.len() as f64)
    };

    Ok(Json(MovieResponse {
        movie,
        rating_count: ratings.len(),
        average_score,
    }))
}

/// Record or replace a user's rating of a movie
pub async fn create_rating(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CreateRatingRequest>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let scale = state.score_scale;
    if !scale.contains(request.score) {
        return Err(AppError::InvalidInput(format!(
            "Score must be between {} and {}",
            scale.min, scale.max
        )));
    }

    let rating = state
        .store
        .upsert_rating(Rating::new(request.user_id, request.movie_id, request.score))
        .await?;

    tracing::info!(
        request_id = %request_id,
        user_id = rating.user_id,
        movie_id = rating.movie_id,
        score = rating.score,
        "Rating recorded"
    );

    Ok((StatusCode::CREATED, Json(rating)))
}

/// Pearson similarity between two users
pub async fn similarity(
    State(state): State<AppState>,
    Path((user_id, other_id)): Path<(UserId, UserId)>,
) -> AppResult<Json<SimilarityResponse>> {
    let similarity = prediction::compare_users(state.store.as_ref(), user_id, other_id).await?;
    Ok(Json(SimilarityResponse {
        user_id,
        other_id,
        similarity,
    }))
}

/// Predict the score a user would give a movie
pub async fn predict(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((user_id, movie_id)): Path<(UserId, MovieId)>,
) -> AppResult<Json<Prediction>> {
    tracing::info!(
        request_id = %request_id,
        user_id,
        movie_id,
        "Processing prediction request"
    );

    let prediction = prediction::predict_rating(state.store.as_ref(), user_id, movie_id).await?;
    Ok(Json(prediction))
}
