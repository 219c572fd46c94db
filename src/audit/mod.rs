//! Audit logging for the budget tracker
//!
//! Records every create and update made through the storage layer, with
//! before/after values, in an append-only JSON-lines log.
//!
//! - `AuditEntry`: a single entry with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
