//! Category model
//!
//! Categories are a per-type suggestion list of labels. Transactions and
//! budgets reference them by name; a category is not a foreign key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Presentation colors a category may be tagged with
pub const COLOR_PALETTE: &[&str] = &[
    "emerald", "blue", "purple", "indigo", "orange", "red", "pink", "yellow", "green", "cyan",
    "violet", "amber",
];

/// Default income categories, in display order, with their colors
const DEFAULT_INCOME: &[(&str, &str)] = &[
    ("Salary", "emerald"),
    ("Freelance", "blue"),
    ("Business", "purple"),
    ("Investment", "indigo"),
    ("Gift", "pink"),
    ("Bonus", "amber"),
    ("Other Income", "green"),
];

/// Default expense categories, in display order, with their colors
const DEFAULT_EXPENSE: &[(&str, &str)] = &[
    ("Food & Dining", "orange"),
    ("Transportation", "red"),
    ("Shopping", "pink"),
    ("Entertainment", "cyan"),
    ("Bills & Utilities", "yellow"),
    ("Healthcare", "green"),
    ("Education", "indigo"),
    ("Travel", "blue"),
    ("Housing", "purple"),
    ("Insurance", "violet"),
    ("Other Expense", "amber"),
];

/// Maximum length of a category name
pub const MAX_NAME_LEN: usize = 50;

/// An income or expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name, unique within its type
    pub name: String,

    /// Which list this category belongs to
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Presentation-only color tag
    pub color: String,

    /// Seeded categories cannot be deleted
    #[serde(default)]
    pub is_default: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new user category
    pub fn new(name: impl Into<String>, kind: TransactionType, color: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
            color: color.into(),
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn seeded(name: &str, kind: TransactionType, color: &str) -> Self {
        let mut category = Self::new(name, kind, color);
        category.is_default = true;
        category
    }

    /// The full default set: income categories first, then expense
    pub fn defaults() -> Vec<Category> {
        DEFAULT_INCOME
            .iter()
            .map(|(name, color)| Self::seeded(name, TransactionType::Income, color))
            .chain(
                DEFAULT_EXPENSE
                    .iter()
                    .map(|(name, color)| Self::seeded(name, TransactionType::Expense, color)),
            )
            .collect()
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_known_color(&self.color) {
            return Err(CategoryValidationError::UnknownColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Whether `color` is one of the palette tags
pub fn is_known_color(color: &str) -> bool {
    COLOR_PALETTE.contains(&color)
}

/// Editable fields of a category. `is_default` and `kind` never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    UnknownColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::UnknownColor(color) => write!(
                f,
                "Unknown color '{}' (expected one of: {})",
                color,
                COLOR_PALETTE.join(", ")
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
