//! Transaction service
//!
//! Records income and expense entries for a user and exports them.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Money, NewTransaction, Transaction, TransactionKind, UserId};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// One line of the CSV export
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Type")]
    kind: &'static str,
}

impl From<&Transaction> for CsvRow {
    fn from(txn: &Transaction) -> Self {
        Self {
            amount: format!("{:.2}", txn.amount.as_f64()),
            category: txn.category.as_str(),
            kind: txn.kind.as_str(),
        }
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a transaction for `user_id`
    ///
    /// The amount is stored as given. Callers that take user input should
    /// run `NewTransaction::validate` first.
    pub fn add(
        &self,
        user_id: UserId,
        amount: Money,
        category: Category,
        kind: TransactionKind,
    ) -> BudgetResult<Transaction> {
        let txn = self
            .storage
            .transactions()
            .insert(&NewTransaction::new(user_id, amount, category, kind))?;

        info!(
            txn_id = %txn.id,
            user_id = %user_id,
            amount = %txn.amount,
            category = %txn.category,
            kind = txn.kind.as_str(),
            "transaction added"
        );

        Ok(txn)
    }

    /// All of a user's transactions, oldest first
    pub fn list(&self, user_id: UserId) -> BudgetResult<Vec<Transaction>> {
        self.storage.transactions().list_by_user(user_id)
    }

    /// Write a user's transactions as CSV with an `Amount,Category,Type` header
    ///
    /// Returns the number of rows written.
    pub fn export_csv<W: Write>(&self, user_id: UserId, writer: W) -> BudgetResult<usize> {
        let transactions = self.list(user_id)?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(["Amount", "Category", "Type"])
            .map_err(|e| BudgetError::Export(e.to_string()))?;

        for txn in &transactions {
            wtr.serialize(CsvRow::from(txn))
                .map_err(|e| BudgetError::Export(e.to_string()))?;
        }
        wtr.flush()?;

        info!(user_id = %user_id, rows = transactions.len(), "exported transactions");
        Ok(transactions.len())
    }
}
