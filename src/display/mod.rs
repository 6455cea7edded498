//! Display formatting for terminal output
//!
//! Formats ledger records and budget figures as tables and detail views.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_table, format_overall_progress};
pub use category::{format_category_details, format_category_tree};
pub use transaction::{format_transaction_details, format_transaction_register};
