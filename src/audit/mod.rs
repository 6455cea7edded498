//! Audit logging for Nest Wealth
//!
//! Every create, update and delete performed through the command line is
//! appended to `audit.log` as one JSON line with before/after snapshots.
//!
//! - `AuditEntry`: a single entry (timestamp, operation, entity, snapshots, diff)
//! - `AuditLogger`: appends entries and reads them back
//! - `diff_values`: the field-level change summary stored on updates

mod diff;
mod entry;
mod logger;

pub use diff::diff_values;
pub use entry::{AuditEntry, Audited, EntityType, Operation};
pub use logger::AuditLogger;
