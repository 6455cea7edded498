//! Category registry
//!
//! Per-type suggestion lists of category labels. Seeded defaults come first
//! in declaration order, user additions follow in creation order. Defaults
//! can be renamed or recolored but never deleted.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{NestError, NestResult};
use crate::models::{Category, CategoryId, CategoryUpdate, TransactionType};

/// Color used when a category is added without one
pub const DEFAULT_COLOR: &str = "blue";

/// The canonical category lists
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    default_color: String,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRegistry {
    /// A registry holding only the seeded defaults
    pub fn new() -> Self {
        Self {
            categories: Category::defaults(),
            default_color: DEFAULT_COLOR.to_string(),
        }
    }

    /// Restore a registry from a snapshot. An empty snapshot is re-seeded.
    pub fn from_categories(categories: Vec<Category>) -> NestResult<Self> {
        if categories.is_empty() {
            return Ok(Self::new());
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for category in &categories {
            category
                .validate()
                .map_err(|e| NestError::Validation(format!("{}: {}", category.name, e)))?;
            if !ids.insert(category.id) {
                return Err(NestError::Validation(format!(
                    "Duplicate category id: {}",
                    category.id
                )));
            }
            if !names.insert((category.kind, normalize(&category.name))) {
                return Err(NestError::Validation(format!(
                    "Duplicate {} category: {}",
                    category.kind.as_str(),
                    category.name
                )));
            }
        }

        // Defaults keep their declaration order ahead of user entries
        let (mut ordered, custom): (Vec<_>, Vec<_>) =
            categories.into_iter().partition(|c| c.is_default);
        ordered.extend(custom);

        Ok(Self {
            categories: ordered,
            default_color: DEFAULT_COLOR.to_string(),
        })
    }

    /// Use `color` for additions that do not name one
    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.set_default_color(color);
        self
    }

    pub fn set_default_color(&mut self, color: impl Into<String>) {
        self.default_color = color.into();
    }

    /// Categories of one type: defaults first, then user additions
    pub fn list_for(&self, kind: TransactionType) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.kind == kind).collect()
    }

    /// Category names of one type, in list order
    pub fn names_for(&self, kind: TransactionType) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Exact name lookup within one type
    pub fn find(&self, kind: TransactionType, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }

    /// Find by id reference or, failing that, case-insensitive name
    ///
    /// A name used by both an income and an expense category is ambiguous.
    pub fn find_any(&self, identifier: &str) -> NestResult<&Category> {
        let by_id = self.categories.iter().filter(|c| c.id.matches_ref(identifier));
        if let Some(category) = super::unique_match("Category", identifier, by_id)? {
            return Ok(category);
        }

        let wanted = normalize(identifier);
        let by_name = self.categories.iter().filter(|c| normalize(&c.name) == wanted);
        super::unique_match("Category", identifier, by_name)?
            .ok_or_else(|| NestError::category_not_found(identifier))
    }

    /// Whether `name` is on the list for `kind` (exact match)
    pub fn contains(&self, kind: TransactionType, name: &str) -> bool {
        self.find(kind, name).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Add a user category
    pub fn add(&mut self, name: &str, kind: TransactionType, color: &str) -> NestResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NestError::Validation("Category name cannot be empty".into()));
        }

        self.ensure_unique(kind, name, None)?;

        let color = match color.trim() {
            "" => self.default_color.clone(),
            other => other.to_lowercase(),
        };

        let category = Category::new(name, kind, color);
        category
            .validate()
            .map_err(|e| NestError::Validation(e.to_string()))?;

        self.categories.push(category.clone());
        debug!(id = %category.id, name = %category.name, kind = %kind, "category added");

        Ok(category)
    }

    /// Rename or recolor a category. Returns the updated record.
    pub fn update(&mut self, id: CategoryId, update: CategoryUpdate) -> NestResult<Category> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            warn!(id = %id, "update of unknown category");
            return Err(NestError::category_not_found(id.to_string()));
        };

        let mut category = self.categories[index].clone();

        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(NestError::Validation("Category name cannot be empty".into()));
            }
            self.ensure_unique(category.kind, name, Some(id))?;
            category.name = name.to_string();
        }

        if let Some(color) = update.color {
            category.color = match color.trim() {
                "" => self.default_color.clone(),
                other => other.to_lowercase(),
            };
        }

        category
            .validate()
            .map_err(|e| NestError::Validation(e.to_string()))?;

        category.updated_at = Utc::now();
        self.categories[index] = category.clone();
        debug!(id = %id, name = %category.name, "category updated");

        Ok(category)
    }

    /// Delete a user category. Defaults are refused.
    ///
    /// Transactions and budgets that carry this label are left untouched.
    pub fn remove(&mut self, id: CategoryId) -> NestResult<Category> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            warn!(id = %id, "removal of unknown category");
            return Err(NestError::category_not_found(id.to_string()));
        };

        if self.categories[index].is_default {
            let name = &self.categories[index].name;
            warn!(id = %id, name = %name, "refused to delete default category");
            return Err(NestError::Forbidden(format!(
                "'{}' is a default category and cannot be deleted",
                name
            )));
        }

        let removed = self.categories.remove(index);
        debug!(id = %id, name = %removed.name, "category removed");

        Ok(removed)
    }

    fn ensure_unique(
        &self,
        kind: TransactionType,
        name: &str,
        except: Option<CategoryId>,
    ) -> NestResult<()> {
        let wanted = normalize(name);
        let clash = self
            .categories
            .iter()
            .any(|c| c.kind == kind && Some(c.id) != except && normalize(&c.name) == wanted);

        if clash {
            return Err(NestError::Validation(format!(
                "A {} category named '{}' already exists",
                kind.as_str(),
                name
            )));
        }

        Ok(())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
