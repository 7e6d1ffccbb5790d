use std::sync::Arc;

use crate::db::RatingStore;
use crate::models::ScoreScale;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RatingStore>,
    pub score_scale: ScoreScale,
}

impl AppState {
    pub fn new(store: Arc<dyn RatingStore>, score_scale: ScoreScale) -> Self {
        Self { store, score_scale }
    }
}
