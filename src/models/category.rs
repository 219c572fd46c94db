//! Spending categories
//!
//! Transactions are labelled with one of a small fixed set of categories.
//! Variants are declared alphabetically so that the derived ordering matches
//! label order, which is the order category totals are reported in.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A transaction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Entertainment,
    Food,
    Others,
    Rent,
    Shopping,
    Transport,
}

impl Category {
    /// All categories in the order they are offered for selection
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Rent,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Others,
    ];

    /// The stored and displayed label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entertainment => "Entertainment",
            Self::Food => "Food",
            Self::Others => "Others",
            Self::Rent => "Rent",
            Self::Shopping => "Shopping",
            Self::Transport => "Transport",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned for a label outside the fixed category set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category '{0}' (expected one of: Food, Rent, Transport, Shopping, Entertainment, Others)")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryParseError(trimmed.to_string()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" RENT ".parse::<Category>().unwrap(), Category::Rent);
        assert_eq!("Others".parse::<Category>().unwrap(), Category::Others);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Groceries".parse::<Category>().unwrap_err();
        assert_eq!(err, CategoryParseError("Groceries".into()));
    }

    #[test]
    fn test_display_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_ordering_is_alphabetical() {
        let mut sorted = Category::ALL.to_vec();
        sorted.sort();
        let labels: Vec<_> = sorted.iter().map(Category::as_str).collect();
        let mut expected = labels.clone();
        expected.sort_unstable();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_unknown_stored_label_is_sql_error() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let result: rusqlite::Result<Category> =
            conn.query_row("SELECT 'Groceries'", [], |row| row.get(0));
        assert!(result.is_err());
    }
}
