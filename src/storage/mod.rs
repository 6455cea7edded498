//! Storage layer for Nest Wealth
//!
//! The ledger core is in-memory; this adapter loads a [`FinanceBook`] from a
//! single JSON snapshot, saves it back atomically, and records mutations in
//! the audit log.

pub mod file_io;

pub use file_io::{read_json, write_json_atomic};

use tracing::debug;

use crate::audit::{AuditLogger, Audited};
use crate::config::NestPaths;
use crate::error::NestError;
use crate::services::{BookData, FinanceBook};

/// Owns the on-disk locations of the book and the audit log
pub struct Storage {
    paths: NestPaths,
    audit: AuditLogger,
}

impl Storage {
    /// Create a Storage instance, creating directories as needed
    pub fn new(paths: NestPaths) -> Result<Self, NestError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &NestPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load the book; a missing file yields a fresh book with default categories
    pub fn load_book(&self) -> Result<FinanceBook, NestError> {
        let path = self.paths.book_file();
        let data: BookData = read_json(&path)?;
        debug!(
            path = %path.display(),
            transactions = data.transactions.len(),
            budgets = data.budgets.len(),
            "book loaded"
        );
        FinanceBook::from_data(data)
    }

    /// Save the whole book atomically
    pub fn save_book(&self, book: &FinanceBook) -> Result<(), NestError> {
        let path = self.paths.book_file();
        write_json_atomic(&path, &book.to_data())?;
        debug!(path = %path.display(), "book saved");
        Ok(())
    }

    pub fn log_create<T: Audited>(&self, record: &T) -> Result<(), NestError> {
        self.audit.log_create(record)
    }

    pub fn log_update<T: Audited>(&self, before: &T, after: &T) -> Result<(), NestError> {
        self.audit.log_update(before, after)
    }

    pub fn log_delete<T: Audited>(&self, record: &T) -> Result<(), NestError> {
        self.audit.log_delete(record)
    }
}
