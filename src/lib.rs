//! Movie rating service with a user-based collaborative filtering predictor.
//!
//! The engine in [`services`] is pure: [`services::similarity::similarity`] scores two
//! users by Pearson correlation over the movies they both rated, and
//! [`services::prediction::predict`] turns the positively correlated raters of a movie
//! into a similarity-weighted score estimate. Everything else feeds it.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
