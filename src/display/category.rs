//! Category display formatting
//!
//! Lists categories under their income/expense headings.

use crate::models::{Category, TransactionType};
use crate::services::CategoryRegistry;

/// Format every category, grouped by type in registry order
pub fn format_category_tree(registry: &CategoryRegistry) -> String {
    if registry.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();

    for (i, kind) in TransactionType::all().iter().enumerate() {
        let categories = registry.list_for(*kind);
        output.push_str(&format!("{}\n", kind));

        if categories.is_empty() {
            output.push_str("  (no categories)\n");
        }

        for (j, category) in categories.iter().enumerate() {
            let prefix = if j == categories.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            let marker = if category.is_default { "" } else { " *" };
            output.push_str(&format!(
                "  {}{} [{}]{}\n",
                prefix, category.name, category.color, marker
            ));
        }

        if i < TransactionType::all().len() - 1 {
            output.push('\n');
        }
    }

    output.push_str("\n* custom category\n");
    output
}

/// Format category details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!("  Type:    {}\n", category.kind));
    output.push_str(&format!("  Color:   {}\n", category.color));
    output.push_str(&format!(
        "  Default: {}\n",
        if category.is_default { "Yes" } else { "No" }
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_lists_both_types() {
        let mut registry = CategoryRegistry::new();
        registry
            .add("Side Gig", TransactionType::Income, "teal")
            .unwrap_err();
        registry
            .add("Side Gig", TransactionType::Income, "cyan")
            .unwrap();

        let formatted = format_category_tree(&registry);
        let income_at = formatted.find("Income").unwrap();
        let expense_at = formatted.find("Expense").unwrap();
        assert!(income_at < expense_at);
        assert!(formatted.contains("Salary [emerald]"));
        assert!(formatted.contains("Side Gig [cyan] *"));
    }

    #[test]
    fn test_format_category_details() {
        let category = Category::new("Pets", TransactionType::Expense, "orange");
        let formatted = format_category_details(&category);
        assert!(formatted.contains("Pets"));
        assert!(formatted.contains("Expense"));
        assert!(formatted.contains("Default: No"));
    }
}
