//! User model

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::money::Money;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Unique display name
    pub username: String,

    /// Unique login email
    pub email: String,

    /// Argon2 PHC hash; never serialized
    #[serde(skip)]
    pub password_hash: String,

    /// Spending ceiling, never negative
    pub budget_goal: Money,
}

/// The identity returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}
