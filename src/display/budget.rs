//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetStatus, BudgetView, OverallProgress};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status_icon(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Good => "✓",
        BudgetStatus::Warning => "!",
        BudgetStatus::Exceeded => "✗",
    }
}

fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.1}%", ratio * 100.0)
    } else {
        "-".to_string()
    }
}

/// Format budget views as a table
pub fn format_budget_table(views: &[BudgetView], symbol: &str) -> String {
    if views.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = views.iter().map(|view| BudgetRow {
        id: view.budget.id.to_string(),
        category: view.budget.category.clone(),
        period: view.budget.period.to_string(),
        window: view.budget.window().to_string(),
        limit: view.budget.amount.format_with_symbol(symbol),
        spent: view.spent.format_with_symbol(symbol),
        remaining: view.remaining.format_with_symbol(symbol),
        used: format_ratio(view.health.ratio),
        status: format!(
            "{} {}",
            status_icon(view.health.status),
            view.health.status.label()
        ),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format the totals line shown under the budget table
pub fn format_overall_progress(progress: &OverallProgress, symbol: &str) -> String {
    format!(
        "Total: {} of {} spent ({}), {} remaining\n",
        progress.total_spent.format_with_symbol(symbol),
        progress.total_limit.format_with_symbol(symbol),
        format_ratio(progress.ratio),
        progress.remaining().format_with_symbol(symbol),
    )
}

/// Format a single budget view
pub fn format_budget_details(view: &BudgetView, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", view.budget.id));
    output.push_str(&format!("  Category:  {}\n", view.budget.category));
    output.push_str(&format!("  Period:    {}\n", view.budget.period));
    output.push_str(&format!("  Window:    {}\n", view.budget.window()));
    output.push_str(&format!(
        "  Limit:     {}\n",
        view.budget.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:     {}\n",
        view.spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Remaining: {}\n",
        view.remaining.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Status:    {} ({})\n",
        view.health.status.label(),
        format_ratio(view.health.ratio)
    ));

    output
}
