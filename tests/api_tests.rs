use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_ratings::api::{create_router, AppState};
use movie_ratings::db::{InMemoryStore, RatingStore};
use movie_ratings::models::{Dataset, Movie, Rating, ScoreScale, User};

/// Users 1 and 2 agree, user 3 disagrees with user 1, user 4 rated nothing.
/// Movie 4 is rated by users 2 and 3 only; movie 5 by nobody.
fn dataset() -> Dataset {
    let ratings = [
        (1, 1, 5),
        (1, 2, 3),
        (1, 3, 4),
        (2, 1, 4),
        (2, 2, 2),
        (2, 3, 5),
        (2, 4, 3),
        (3, 1, 1),
        (3, 2, 5),
        (3, 4, 1),
    ];

    Dataset {
        users: (1..=4).map(User::new).collect(),
        movies: vec![
            Movie::new(1, "Toy Story"),
            Movie::new(2, "GoldenEye"),
            Movie::new(3, "Four Rooms"),
            Movie::new(4, "Get Shorty"),
            Movie::new(5, "Copycat"),
        ],
        ratings: ratings
            .iter()
            .map(|&(user_id, movie_id, score)| Rating::new(user_id, movie_id, score))
            .collect(),
    }
}

async fn create_test_server() -> TestServer {
    let store = InMemoryStore::new();
    store.import(dataset()).await.unwrap();
    let state = AppState::new(Arc::new(store), ScoreScale::default());
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server().await;
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static("test-request-1"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "test-request-1");
}

#[tokio::test]
async fn test_list_users() {
    let server = create_test_server().await;
    let response = server.get("/api/v1/users").await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 4);
    assert_eq!(users[0]["user_id"], 1);
}

#[tokio::test]
async fn test_get_user() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/users/2").await;
    response.assert_status_ok();
    let user: User = response.json();
    assert_eq!(user, User::new(2));

    let response = server.get("/api/v1/users/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "User 99");
}

#[tokio::test]
async fn test_user_ratings() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/users/3/ratings").await;
    response.assert_status_ok();
    let ratings: Vec<Rating> = response.json();
    assert_eq!(
        ratings,
        vec![Rating::new(3, 1, 1), Rating::new(3, 2, 5), Rating::new(3, 4, 1)]
    );

    let response = server.get("/api/v1/users/4/ratings").await;
    response.assert_status_ok();
    let ratings: Vec<Rating> = response.json();
    assert!(ratings.is_empty());

    let response = server.get("/api/v1/users/99/ratings").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_movie() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/movies/4").await;
    response.assert_status_ok();
    let movie: Value = response.json();
    assert_eq!(movie["title"], "Get Shorty");
    assert_eq!(movie["rating_count"], 2);
    assert_eq!(movie["average_score"], 2.0);

    let response = server.get("/api/v1/movies/5").await;
    let movie: Value = response.json();
    assert_eq!(movie["rating_count"], 0);
    assert!(movie["average_score"].is_null());

    server
        .get("/api/v1/movies/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_similarity() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/users/1/similarity/2").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let similarity = body["similarity"].as_f64().unwrap();
    assert!((similarity - 6.0 / 84.0_f64.sqrt()).abs() < 1e-12);

    let response = server.get("/api/v1/users/1/similarity/3").await;
    let body: Value = response.json();
    assert_eq!(body["similarity"].as_f64().unwrap(), -1.0);

    let response = server.get("/api/v1/users/1/similarity/4").await;
    let body: Value = response.json();
    assert_eq!(body["similarity"].as_f64().unwrap(), 0.0);

    server
        .get("/api/v1/users/1/similarity/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prediction_excludes_dissimilar_raters() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/users/1/predictions/4").await;
    response.assert_status_ok();
    let prediction: Value = response.json();
    assert_eq!(prediction["score"].as_f64().unwrap(), 3.0);
    assert_eq!(prediction["candidates"], 2);
    assert_eq!(prediction["contributors"], 1);
}

#[tokio::test]
async fn test_prediction_without_signal_is_null() {
    let server = create_test_server().await;

    // Nobody rated movie 5
    let response = server.get("/api/v1/users/1/predictions/5").await;
    response.assert_status_ok();
    let prediction: Value = response.json();
    assert!(prediction["score"].is_null());
    assert_eq!(prediction["candidates"], 0);

    // User 4 shares no movie with anybody
    let response = server.get("/api/v1/users/4/predictions/4").await;
    response.assert_status_ok();
    let prediction: Value = response.json();
    assert!(prediction["score"].is_null());
    assert_eq!(prediction["candidates"], 2);
    assert_eq!(prediction["contributors"], 0);
}

#[tokio::test]
async fn test_prediction_for_unknown_ids() {
    let server = create_test_server().await;

    server
        .get("/api/v1/users/99/predictions/4")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/v1/users/1/predictions/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rating_changes_prediction() {
    let server = create_test_server().await;

    // User 4 now agrees with user 2 on two movies, so user 2 becomes a neighbour
    for (movie_id, score) in [(1, 4), (2, 1)] {
        let response = server
            .post("/api/v1/ratings")
            .json(&json!({ "user_id": 4, "movie_id": movie_id, "score": score }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let response = server.get("/api/v1/users/4/predictions/4").await;
    let prediction: Value = response.json();
    assert_eq!(prediction["score"].as_f64().unwrap(), 3.0);
    assert_eq!(prediction["contributors"], 1);
}

#[tokio::test]
async fn test_rating_is_replaced_not_duplicated() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/ratings")
        .json(&json!({ "user_id": 1, "movie_id": 1, "score": 2 }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let rating: Rating = response.json();
    assert_eq!(rating, Rating::new(1, 1, 2));

    let ratings: Vec<Rating> = server.get("/api/v1/users/1/ratings").await.json();
    assert_eq!(ratings.len(), 3);
    assert_eq!(ratings[0], Rating::new(1, 1, 2));
}

#[tokio::test]
async fn test_create_rating_validation() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/ratings")
        .json(&json!({ "user_id": 1, "movie_id": 5, "score": 6 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Score must be between 1 and 5");

    server
        .post("/api/v1/ratings")
        .json(&json!({ "user_id": 99, "movie_id": 5, "score": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .post("/api/v1/ratings")
        .json(&json!({ "user_id": 1, "movie_id": 99, "score": 3 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
