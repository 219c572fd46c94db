//! Database schema
//!
//! Creates both tables on first open. Statements are idempotent, so running
//! them against an existing database is a no-op.

use rusqlite::Connection;

use crate::error::BudgetResult;

/// Users table: credentials plus the per-user budget goal
pub const CREATE_USERS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    budget_goal REAL DEFAULT 0.0
)";

/// Transactions table; `type` is 'income' or 'expense'
pub const CREATE_TRANSACTIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    type TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    FOREIGN KEY(user_id) REFERENCES users(id)
)";

/// Configure the connection and create any missing tables
pub fn initialize(conn: &Connection) -> BudgetResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute(CREATE_USERS_TABLE, [])?;
    conn.execute(CREATE_TRANSACTIONS_TABLE, [])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_initialize_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        assert_eq!(table_names(&conn), vec!["transactions", "users"]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        initialize(&conn).unwrap();

        assert_eq!(table_names(&conn).len(), 2);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_budget_goal_defaults_to_zero() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        conn.execute(
            "INSERT INTO users (username, email, password) VALUES ('a', 'a@x', 'h')",
            [],
        )
        .unwrap();
        let goal: f64 = conn
            .query_row("SELECT budget_goal FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(goal, 0.0);
    }
}
