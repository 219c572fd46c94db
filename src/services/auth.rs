//! Authentication service
//!
//! Registers users with salted Argon2id password hashes and checks login
//! attempts against them.

use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::crypto::{hash_password, verify_password_or_dummy, PasswordHashParams};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Identity, User};
use crate::storage::Storage;

/// Service for registration and login
pub struct AuthService<'a> {
    storage: &'a Storage,
    hash_params: PasswordHashParams,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service hashing with the configured cost
    pub fn new(storage: &'a Storage, settings: &Settings) -> Self {
        Self::with_params(storage, settings.password_hashing)
    }

    /// Create a new auth service with explicit hash parameters
    pub fn with_params(storage: &'a Storage, hash_params: PasswordHashParams) -> Self {
        Self {
            storage,
            hash_params,
        }
    }

    /// Register a new user
    ///
    /// The password is hashed before it reaches the database. Fails with
    /// `DuplicateKey` if the username or email is already registered.
    pub fn register(&self, username: &str, email: &str, password: &str) -> BudgetResult<User> {
        let password_hash = hash_password(password, &self.hash_params)?;

        let user = self.storage.users().insert(username, email, &password_hash)?;
        info!(user_id = %user.id, username = %user.username, "registered user");

        Ok(user)
    }

    /// Check an email/password pair
    ///
    /// An unknown email and a wrong password both give `InvalidCredentials`
    /// after the same amount of hashing work.
    pub fn authenticate(&self, email: &str, password: &str) -> BudgetResult<Identity> {
        let user = self.storage.users().find_by_email(email)?;
        let verified = verify_password_or_dummy(
            password,
            user.as_ref().map(|u| u.password_hash.as_str()),
            &self.hash_params,
        )?;

        match user {
            Some(user) if verified => {
                info!(user_id = %user.id, "user logged in");
                Ok(Identity::from(&user))
            }
            _ => {
                warn!("login failed");
                Err(BudgetError::InvalidCredentials)
            }
        }
    }
}
