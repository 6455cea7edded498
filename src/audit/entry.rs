//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Budget, Category, Transaction};

use super::diff::diff_values;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Kind of record changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Category,
    Budget,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Category => write!(f, "Category"),
            EntityType::Budget => write!(f, "Budget"),
        }
    }
}

/// A record that can appear in the audit log
pub trait Audited: Serialize {
    const ENTITY_TYPE: EntityType;

    fn audit_id(&self) -> String;

    /// Human-readable label (title, name, category)
    fn audit_name(&self) -> String;
}

impl Audited for Transaction {
    const ENTITY_TYPE: EntityType = EntityType::Transaction;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn audit_name(&self) -> String {
        self.title.clone()
    }
}

impl Audited for Category {
    const ENTITY_TYPE: EntityType = EntityType::Category;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn audit_name(&self) -> String {
        self.name.clone()
    }
}

impl Audited for Budget {
    const ENTITY_TYPE: EntityType = EntityType::Budget;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn audit_name(&self) -> String {
        self.category.clone()
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Short display id of the record
    pub entity_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// State before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// State after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Changed fields, e.g. `amount: 8950 -> 9000`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn base<T: Audited>(operation: Operation, record: &T) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type: T::ENTITY_TYPE,
            entity_id: record.audit_id(),
            entity_name: Some(record.audit_name()),
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn created<T: Audited>(record: &T) -> Self {
        Self {
            after: serde_json::to_value(record).ok(),
            ..Self::base(Operation::Create, record)
        }
    }

    /// Entry for a replacement, with the changed fields summarized
    pub fn updated<T: Audited>(before: &T, after: &T) -> Self {
        let before_json = serde_json::to_value(before).ok();
        let after_json = serde_json::to_value(after).ok();
        let diff_summary = match (&before_json, &after_json) {
            (Some(b), Some(a)) => diff_values(b, a),
            _ => None,
        };

        Self {
            before: before_json,
            after: after_json,
            diff_summary,
            ..Self::base(Operation::Update, after)
        }
    }

    pub fn deleted<T: Audited>(record: &T) -> Self {
        Self {
            before: serde_json::to_value(record).ok(),
            ..Self::base(Operation::Delete, record)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
