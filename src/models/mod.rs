//! Core data models for the budget tracker
//!
//! This module contains the data structures that represent the domain:
//! users, transactions, categories and money.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod user;

pub use category::{Category, CategoryParseError};
pub use ids::{TransactionId, UserId};
pub use money::{Money, MoneyParseError};
pub use transaction::{
    KindParseError, NewTransaction, Transaction, TransactionKind, TransactionValidationError,
};
pub use user::{Identity, User};
