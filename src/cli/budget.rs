//! Budget CLI commands
//!
//! Implements CLI commands for spending limits and their progress.

use clap::Subcommand;

use super::{parse_amount, today};
use crate::config::Settings;
use crate::display::{format_budget_details, format_budget_table, format_overall_progress};
use crate::error::{NestError, NestResult};
use crate::models::{BudgetDraft, BudgetPeriod};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets with spend, remaining and status
    List,

    /// Show one budget
    Show {
        /// Budget ID or category name
        budget: String,
    },

    /// Create a budget for a category
    Create {
        /// Category name (matched exactly against transactions)
        category: String,
        /// Limit for the period (e.g., "400")
        amount: String,
        /// weekly or monthly (default: from settings)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Edit a budget; the window moves to the period containing today
    Edit {
        /// Budget ID or category name
        budget: String,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New limit
        #[arg(short, long)]
        amount: Option<String>,
        /// New period
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID or category name
        budget: String,
    },

    /// Move budgets whose window has ended into the current period
    Roll,
}

fn parse_period(s: &str) -> NestResult<BudgetPeriod> {
    s.parse().map_err(NestError::Validation)
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> NestResult<()> {
    let mut book = storage.load_book()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::List => {
            let views = book.budget_views();
            print!("{}", format_budget_table(&views, symbol));
            if !views.is_empty() {
                print!("{}", format_overall_progress(&book.budget_progress(), symbol));
            }
        }

        BudgetCommands::Show { budget } => {
            let budget = book.find_budget(&budget)?;
            let view = book.budgets().view(budget, book.ledger());
            print!("{}", format_budget_details(&view, symbol));
        }

        BudgetCommands::Create {
            category,
            amount,
            period,
        } => {
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => settings.default_budget_period,
            };
            let draft = BudgetDraft::new(category, parse_amount(&amount)?, period);

            let budget = book.create_budget(draft, today())?;
            storage.save_book(&book)?;
            storage.log_create(&budget)?;

            println!("Created budget: {}", budget);
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::Edit {
            budget,
            category,
            amount,
            period,
        } => {
            if category.is_none() && amount.is_none() && period.is_none() {
                println!("No changes specified. Use --category, --amount or --period.");
                return Ok(());
            }

            let current = book.find_budget(&budget)?.clone();
            let draft = BudgetDraft::new(
                category.unwrap_or_else(|| current.category.clone()),
                match amount {
                    Some(a) => parse_amount(&a)?,
                    None => current.amount,
                },
                match period {
                    Some(p) => parse_period(&p)?,
                    None => current.period,
                },
            );

            let before = book.update_budget(current.id, draft, today())?;
            let after = book
                .budgets()
                .get(current.id)
                .cloned()
                .ok_or_else(|| NestError::budget_not_found(current.id.to_string()))?;
            storage.save_book(&book)?;
            storage.log_update(&before, &after)?;

            println!("Updated budget: {}", after);
        }

        BudgetCommands::Delete { budget } => {
            let id = book.find_budget(&budget)?.id;
            let removed = book.remove_budget(id)?;
            storage.save_book(&book)?;
            storage.log_delete(&removed)?;

            println!("Deleted budget: {}", removed.category);
        }

        BudgetCommands::Roll => {
            let before = book.budgets().list().to_vec();
            let rolled = book.roll_budgets(today());
            if rolled.is_empty() {
                println!("All budgets are in their current period.");
                return Ok(());
            }

            storage.save_book(&book)?;
            for id in &rolled {
                let previous = before.iter().find(|b| b.id == *id);
                if let (Some(previous), Some(current)) = (previous, book.budgets().get(*id)) {
                    storage.log_update(previous, current)?;
                    println!("Rolled {} to {}", current.category, current.window());
                }
            }
        }
    }

    Ok(())
}
