//! Service layer for the budget tracker
//!
//! Services sit on top of the storage layer and own validation and logging.
//! Each one borrows the `Storage` handle it is given.

pub mod auth;
pub mod budget;
pub mod transaction;

pub use auth::AuthService;
pub use budget::BudgetService;
pub use transaction::TransactionService;
