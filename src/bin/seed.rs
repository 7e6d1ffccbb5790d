//! Loads the MovieLens `u.user`, `u.item` and `u.data` files into PostgreSQL.
//!
//! Usage: `seed [DIR]`, where `DIR` defaults to `SEED_DATA_DIR` or `seed_data`.

use movie_ratings::{
    config::Config,
    db::{self, PgRatingStore, RatingStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "movie_ratings=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let dir = std::env::args()
        .nth(1)
        .or_else(|| config.seed_data_dir.clone())
        .unwrap_or_else(|| "seed_data".to_string());

    let dataset = db::load_dataset(&dir, config.score_scale())?;

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let store = PgRatingStore::new(pool);
    store.clear().await?;
    store.import(dataset).await?;

    tracing::info!(dir = %dir, "Seeding complete");
    Ok(())
}
