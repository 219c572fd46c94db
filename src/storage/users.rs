//! User repository for SQLite storage
//!
//! Reads and writes the `users` table: registration rows, lookups by email,
//! and the per-user budget goal.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, User, UserId};

use super::{constraint_violation, ConstraintViolation, Storage};

const USER_COLUMNS: &str = "id, username, email, password, budget_goal";

/// Repository for the `users` table
pub struct UserRepository<'a> {
    storage: &'a Storage,
}

impl<'a> UserRepository<'a> {
    pub(crate) fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Insert a new user with a zero budget goal
    ///
    /// Fails with `DuplicateKey` when the username or email is taken. The row
    /// is committed only once its audit entry has been written.
    pub fn insert(&self, username: &str, email: &str, password_hash: &str) -> BudgetResult<User> {
        let tx = self.storage.connection().unchecked_transaction()?;

        tx.execute(
            "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
            params![username, email, password_hash],
        )
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintViolation::Unique(msg)) if msg.contains("users.email") => {
                BudgetError::duplicate_user(email)
            }
            Some(ConstraintViolation::Unique(_)) => BudgetError::duplicate_user(username),
            _ => BudgetError::from(e),
        })?;

        let user = User {
            id: UserId::new(tx.last_insert_rowid()),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            budget_goal: Money::zero(),
        };
        debug!(user_id = %user.id, "inserted user");

        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            &user,
        )?;
        tx.commit()?;

        Ok(user)
    }

    /// Look up a user by email
    pub fn find_by_email(&self, email: &str) -> BudgetResult<Option<User>> {
        let user = self
            .storage
            .connection()
            .query_row(
                &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                [email],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Look up a user by id
    pub fn get(&self, id: UserId) -> BudgetResult<Option<User>> {
        let user = self
            .storage
            .connection()
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                [id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Read the stored goal, `None` if the user row does not exist
    pub fn get_goal(&self, id: UserId) -> BudgetResult<Option<Money>> {
        let goal: Option<Option<f64>> = self
            .storage
            .connection()
            .query_row("SELECT budget_goal FROM users WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(goal.map(|g| Money::from_f64(g.unwrap_or(0.0))))
    }

    /// Overwrite the stored goal
    ///
    /// Fails with `NotFound` when no row has this id. Nothing changes if the
    /// audit entry cannot be written.
    pub fn update_goal(&self, id: UserId, goal: Money) -> BudgetResult<()> {
        let tx = self.storage.connection().unchecked_transaction()?;
        let before = self
            .get(id)?
            .ok_or_else(|| BudgetError::user_not_found(id.to_string()))?;

        tx.execute(
            "UPDATE users SET budget_goal = ?1 WHERE id = ?2",
            params![goal.as_f64(), id],
        )?;
        debug!(user_id = %id, goal = %goal, "updated budget goal");

        self.storage.log_update(
            EntityType::BudgetGoal,
            id.to_string(),
            Some(before.username),
            &before.budget_goal,
            &goal,
            Some(format!("{} -> {}", before.budget_goal, goal)),
        )?;
        tx.commit()?;

        Ok(())
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let goal: Option<f64> = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        budget_goal: Money::from_f64(goal.unwrap_or(0.0)),
    })
}
