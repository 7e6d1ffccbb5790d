pub mod prediction;
pub mod similarity;

pub use prediction::{compare_users, predict, predict_rating, Neighbor};
pub use similarity::{pearson, similarity};
