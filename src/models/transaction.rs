//! Transaction model
//!
//! Represents an income or expense record owned by a user. Transactions are
//! append-only: they are never edited or deleted once stored.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::category::Category;
use super::ids::{TransactionId, UserId};
use super::money::Money;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The stored label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a kind other than `income` or `expense`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown transaction type '{0}' (expected 'income' or 'expense')")]
pub struct KindParseError(pub String);

impl FromStr for TransactionKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(KindParseError(s.trim().to_string())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owning user
    pub user_id: UserId,

    /// Amount, always positive; `kind` gives the direction
    pub amount: Money,

    pub category: Category,

    pub kind: TransactionKind,
}

impl Transaction {
    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub amount: Money,
    pub category: Category,
    pub kind: TransactionKind,
}

impl NewTransaction {
    /// Create a new transaction input
    pub fn new(user_id: UserId, amount: Money, category: Category, kind: TransactionKind) -> Self {
        Self {
            user_id,
            amount,
            category,
            kind,
        }
    }

    /// Check the amount is strictly positive
    ///
    /// The transaction service stores whatever it is given, so callers run
    /// this before handing input over.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionValidationError {
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Money),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!("Expense".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_string(&TransactionKind::Expense).unwrap(), "\"expense\"");
    }

    #[test]
    fn test_validate_positive_amount() {
        let input = NewTransaction::new(
            UserId::new(1),
            Money::from_cents(1),
            Category::Food,
            TransactionKind::Expense,
        );
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_and_negative() {
        let mut input = NewTransaction::new(
            UserId::new(1),
            Money::zero(),
            Category::Food,
            TransactionKind::Expense,
        );
        assert_eq!(
            input.validate(),
            Err(TransactionValidationError::NonPositiveAmount(Money::zero()))
        );

        input.amount = Money::from_cents(-500);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_kind_checks() {
        let txn = Transaction {
            id: TransactionId::new(1),
            user_id: UserId::new(1),
            amount: Money::from_dollars(10),
            category: Category::Rent,
            kind: TransactionKind::Income,
        };
        assert!(txn.is_income());
        assert!(!txn.is_expense());
    }
}
