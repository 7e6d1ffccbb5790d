use serde::{Deserialize, Serialize};

pub type UserId = i32;

/// A user of the ratings site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct User {
    pub user_id: UserId,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub zipcode: Option<String>,
}

impl User {
    /// Creates a user with no profile details
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            email: None,
            age: None,
            zipcode: None,
        }
    }
}
