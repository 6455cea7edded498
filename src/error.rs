//! Custom error types for Nest Wealth
//!
//! This module defines the error hierarchy for the application using thiserror.
//! The three domain variants (validation, not found, forbidden) are what the
//! ledger core raises; the rest belong to the storage, config and export layers.

use thiserror::Error;

/// The main error type for Nest Wealth operations
#[derive(Error, Debug)]
pub enum NestError {
    /// Malformed input at a boundary (blank field, non-positive amount, duplicate name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Update/delete referencing a missing id
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A short reference that names more than one record
    #[error("Ambiguous {entity_type} reference '{identifier}' matches {matches} records; use the full id")]
    Ambiguous {
        entity_type: &'static str,
        identifier: String,
        matches: usize,
    },

    /// An operation the core refuses regardless of caller (e.g. deleting a default category)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl NestError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create an error for a reference matching several records
    pub fn ambiguous(entity_type: &'static str, identifier: impl Into<String>, matches: usize) -> Self {
        Self::Ambiguous {
            entity_type,
            identifier: identifier.into(),
            matches,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if a reference matched more than one record
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// Check if this is a forbidden operation
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}

impl From<std::io::Error> for NestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for NestError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for Nest Wealth operations
pub type NestResult<T> = Result<T, NestError>;
