pub mod memory;
pub mod postgres;
pub mod seed;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::{create_pool, run_migrations, PgRatingStore};
pub use seed::load_dataset;
pub use store::RatingStore;

#[cfg(test)]
pub use store::MockRatingStore;
