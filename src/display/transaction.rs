//! Transaction display formatting
//!
//! Renders a user's transactions as a terminal table.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Type")]
    kind: &'static str,
}

/// Format transactions as a table, oldest first
pub fn format_transaction_table(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        amount: txn.amount.format_with_symbol(currency_symbol),
        category: txn.category.as_str(),
        kind: txn.kind.as_str(),
    });

    let mut output = Table::new(rows).with(Style::modern()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionId, TransactionKind, UserId};

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "$"), "No transactions found.\n");
    }

    #[test]
    fn test_table_rows() {
        let transactions = vec![
            Transaction {
                id: TransactionId::new(1),
                user_id: UserId::new(1),
                amount: Money::from_cents(1250),
                category: Category::Food,
                kind: TransactionKind::Expense,
            },
            Transaction {
                id: TransactionId::new(2),
                user_id: UserId::new(1),
                amount: Money::from_dollars(2000),
                category: Category::Others,
                kind: TransactionKind::Income,
            },
        ];

        let table = format_transaction_table(&transactions, "$");

        assert!(table.contains("Category"));
        assert!(table.contains("$12.50"));
        assert!(table.contains("$2000.00"));
        assert!(table.contains("expense"));
        assert!(table.contains("income"));
        assert!(table.find("Food").unwrap() < table.find("Others").unwrap());
    }
}
