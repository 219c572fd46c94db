//! Budget service
//!
//! Reads and writes the per-user spending goal.

use tracing::{info, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, UserId};
use crate::storage::Storage;

/// Service for budget goal management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Overwrite the user's goal
    ///
    /// The goal must not be negative. Fails with `NotFound` if the user does
    /// not exist.
    pub fn set_goal(&self, user_id: UserId, amount: Money) -> BudgetResult<()> {
        if amount.is_negative() {
            return Err(BudgetError::Validation(format!(
                "Budget goal cannot be negative, got {}",
                amount
            )));
        }

        self.storage.users().update_goal(user_id, amount)?;
        info!(user_id = %user_id, goal = %amount, "budget goal updated");

        Ok(())
    }

    /// Read the user's goal
    ///
    /// A missing user row reads as a zero goal.
    pub fn get_goal(&self, user_id: UserId) -> BudgetResult<Money> {
        match self.storage.users().get_goal(user_id)? {
            Some(goal) => Ok(goal),
            None => {
                warn!(user_id = %user_id, "no user row for budget goal, using 0");
                Ok(Money::zero())
            }
        }
    }
}
