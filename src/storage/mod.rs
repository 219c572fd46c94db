//! Storage layer for the budget tracker
//!
//! A single SQLite connection holds both tables. Repositories borrow the
//! connection from `Storage`, so one handle is opened per process and passed
//! explicitly to every service.

pub mod file_io;
pub mod schema;
pub mod transactions;
pub mod users;

pub use transactions::TransactionRepository;
pub use users::UserRepository;

use std::path::Path;

use rusqlite::{ffi, Connection, ErrorCode};
use serde::Serialize;
use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::BudgetResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    conn: Connection,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Open (creating if needed) the database file at `path`
    pub fn open(path: impl AsRef<Path>) -> BudgetResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> BudgetResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open the database in the data directory, with auditing if enabled
    pub fn open_with_paths(paths: &BudgetPaths, settings: &Settings) -> BudgetResult<Self> {
        paths.ensure_directories()?;

        let storage = Self::open(paths.database_file())?;
        if settings.audit_enabled {
            Ok(storage.with_audit_log(AuditLogger::new(paths.audit_log())))
        } else {
            Ok(storage)
        }
    }

    fn from_connection(conn: Connection) -> BudgetResult<Self> {
        schema::initialize(&conn)?;
        Ok(Self { conn, audit: None })
    }

    /// Record every create and update in `logger`
    pub fn with_audit_log(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// The audit logger, if auditing is enabled
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Access the users table
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    /// Access the transactions table
    pub fn transactions(&self) -> TransactionRepository<'_> {
        TransactionRepository::new(self)
    }

    /// Get the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }

    pub(crate) fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> BudgetResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::update(
                entity_type,
                entity_id,
                entity_name,
                before,
                after,
                diff_summary,
            )),
            None => Ok(()),
        }
    }
}

/// Which constraint a failed statement tripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    /// UNIQUE failed; carries SQLite's message, e.g. "UNIQUE constraint failed: users.email"
    Unique(String),
    ForeignKey,
}

pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<ConstraintViolation> {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            match e.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Some(
                    ConstraintViolation::Unique(msg.clone().unwrap_or_default()),
                ),
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintViolation::ForeignKey),
                _ => None,
            }
        }
        _ => None,
    }
}
