use std::sync::Arc;

use movie_ratings::{
    api::{create_router, AppState},
    config::{Config, StorageBackend},
    db::{self, InMemoryStore, PgRatingStore, RatingStore},
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_ratings=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let scale = config.score_scale();

    let store: Arc<dyn RatingStore> = match config.storage {
        StorageBackend::Memory => {
            let store = InMemoryStore::new();
            if let Some(dir) = &config.seed_data_dir {
                let dataset = db::load_dataset(dir, scale)?;
                store.import(dataset).await?;
            }
            Arc::new(store)
        }
        StorageBackend::Postgres => {
            let pool = db::create_pool(&config.database_url).await?;
            db::run_migrations(&pool).await?;
            Arc::new(PgRatingStore::new(pool))
        }
    };

    tracing::info!(
        store = store.name(),
        min_score = scale.min,
        max_score = scale.max,
        "Rating store ready"
    );

    let app = create_router(AppState::new(store, scale)).layer(CorsLayer::permissive());

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
