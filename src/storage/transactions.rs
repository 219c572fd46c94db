//! Transaction repository for SQLite storage
//!
//! Rows are only ever inserted; listing returns them in insertion order.

use rusqlite::{params, Row};
use tracing::debug;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, NewTransaction, Transaction, TransactionId, UserId};

use super::{constraint_violation, ConstraintViolation, Storage};

/// Repository for the `transactions` table
pub struct TransactionRepository<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionRepository<'a> {
    pub(crate) fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Insert a transaction as given
    ///
    /// Fails with `NotFound` when the owning user does not exist. The row is
    /// committed only once its audit entry has been written.
    pub fn insert(&self, input: &NewTransaction) -> BudgetResult<Transaction> {
        let tx = self.storage.connection().unchecked_transaction()?;

        tx.execute(
            "INSERT INTO transactions (amount, category, type, user_id) VALUES (?1, ?2, ?3, ?4)",
            params![input.amount.as_f64(), input.category, input.kind, input.user_id],
        )
        .map_err(|e| match constraint_violation(&e) {
            Some(ConstraintViolation::ForeignKey) => {
                BudgetError::user_not_found(input.user_id.to_string())
            }
            _ => BudgetError::from(e),
        })?;

        let txn = Transaction {
            id: TransactionId::new(tx.last_insert_rowid()),
            user_id: input.user_id,
            amount: input.amount,
            category: input.category,
            kind: input.kind,
        };
        debug!(txn_id = %txn.id, user_id = %txn.user_id, "inserted transaction");

        self.storage
            .log_create(EntityType::Transaction, txn.id.to_string(), None, &txn)?;
        tx.commit()?;

        Ok(txn)
    }

    /// All transactions for a user, oldest first
    pub fn list_by_user(&self, user_id: UserId) -> BudgetResult<Vec<Transaction>> {
        let mut stmt = self.storage.connection().prepare(
            "SELECT id, amount, category, type, user_id FROM transactions WHERE user_id = ?1 ORDER BY id",
        )?;

        let transactions = stmt
            .query_map([user_id], transaction_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: Money::from_f64(row.get(1)?),
        category: row.get(2)?,
        kind: row.get(3)?,
        user_id: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLogger;
    use crate::models::{Category, TransactionKind};

    fn storage_with_user() -> (Storage, UserId) {
        let storage = Storage::open_in_memory().unwrap();
        let user = storage.users().insert("alice", "alice@example.com", "h").unwrap();
        (storage, user.id)
    }

    #[test]
    fn test_insert_and_list_in_order() {
        let (storage, user_id) = storage_with_user();
        let repo = storage.transactions();

        let inputs = [
            NewTransaction::new(user_id, Money::from_dollars(100), Category::Food, TransactionKind::Expense),
            NewTransaction::new(user_id, Money::from_cents(250_050), Category::Others, TransactionKind::Income),
            NewTransaction::new(user_id, Money::from_dollars(200), Category::Rent, TransactionKind::Expense),
        ];
        for input in &inputs {
            repo.insert(input).unwrap();
        }

        let listed = repo.list_by_user(user_id).unwrap();
        assert_eq!(listed.len(), 3);
        for (txn, input) in listed.iter().zip(&inputs) {
            assert_eq!(txn.amount, input.amount);
            assert_eq!(txn.category, input.category);
            assert_eq!(txn.kind, input.kind);
            assert_eq!(txn.user_id, user_id);
        }
        assert!(listed[0].id < listed[1].id && listed[1].id < listed[2].id);
    }

    #[test]
    fn test_list_is_scoped_to_user() {
        let (storage, alice) = storage_with_user();
        let bob = storage.users().insert("bob", "bob@example.com", "h").unwrap().id;
        let repo = storage.transactions();

        repo.insert(&NewTransaction::new(alice, Money::from_dollars(5), Category::Food, TransactionKind::Expense))
            .unwrap();

        assert_eq!(repo.list_by_user(alice).unwrap().len(), 1);
        assert!(repo.list_by_user(bob).unwrap().is_empty());
    }

    #[test]
    fn test_insert_for_unknown_user() {
        let storage = Storage::open_in_memory().unwrap();

        let err = storage
            .transactions()
            .insert(&NewTransaction::new(
                UserId::new(42),
                Money::from_dollars(5),
                Category::Food,
                TransactionKind::Expense,
            ))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_failed_audit_write_rolls_back() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let (storage, user_id) = storage_with_user();
        let storage = storage.with_audit_log(AuditLogger::new(temp_dir.path().to_path_buf()));

        let result = storage.transactions().insert(&NewTransaction::new(
            user_id,
            Money::from_dollars(5),
            Category::Food,
            TransactionKind::Expense,
        ));

        assert!(result.is_err());
        assert!(storage.transactions().list_by_user(user_id).unwrap().is_empty());
    }

    #[test]
    fn test_stored_labels() {
        let (storage, user_id) = storage_with_user();
        storage
            .transactions()
            .insert(&NewTransaction::new(user_id, Money::from_dollars(5), Category::Transport, TransactionKind::Expense))
            .unwrap();

        let (category, kind): (String, String) = storage
            .connection()
            .query_row("SELECT category, type FROM transactions", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(category, "Transport");
        assert_eq!(kind, "expense");
    }
}
