//! Audit log file
//!
//! Registrations, goal changes and new transactions are appended to a JSON
//! Lines file next to the database. `budget history` reads it back.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{BudgetError, BudgetResult};

use super::entry::AuditEntry;

/// Appends change records to, and reads them from, one JSONL file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one record; it is on disk when this returns `Ok`
    pub fn log(&self, entry: &AuditEntry) -> BudgetResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| BudgetError::Json(format!("Cannot encode audit record: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("open", e))?;

        writeln!(file, "{}", line).map_err(|e| self.io_error("append to", e))?;
        file.sync_data().map_err(|e| self.io_error("sync", e))
    }

    /// Every record in the file, oldest first; a missing file has none
    pub fn read_all(&self) -> BudgetResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_entry(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` records, oldest first
    pub fn read_recent(&self, count: usize) -> BudgetResult<Vec<AuditEntry>> {
        let mut recent = VecDeque::new();
        self.for_each_entry(|entry| {
            if recent.len() == count {
                recent.pop_front();
            }
            if count > 0 {
                recent.push_back(entry);
            }
        })?;
        Ok(recent.into())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn for_each_entry(&self, mut visit: impl FnMut(AuditEntry)) -> BudgetResult<()> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(self.io_error("open", e)),
        };

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| self.io_error(&format!("read line {} of", line_no), e))?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                BudgetError::Json(format!("Bad audit record at line {}: {}", line_no, e))
            })?;
            visit(entry);
        }
        Ok(())
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> BudgetError {
        BudgetError::Io(format!(
            "Cannot {} audit log {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}
