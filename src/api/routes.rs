use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            // Request IDs are assigned before the trace span is created
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Users
        .route("/users", get(handlers::list_users))
        .route("/users/:user_id", get(handlers::get_user))
        .route("/users/:user_id/ratings", get(handlers::user_ratings))
        .route(
            "/users/:user_id/similarity/:other_id",
            get(handlers::similarity),
        )
        .route(
            "/users/:user_id/predictions/:movie_id",
            get(handlers::predict),
        )
        // Movies
        .route("/movies/:movie_id", get(handlers::get_movie))
        // Ratings
        .route("/ratings", post(handlers::create_rating))
}
