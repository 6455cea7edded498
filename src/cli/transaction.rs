//! Transaction CLI commands
//!
//! Implements CLI commands for recording, listing and editing transactions.

use clap::Subcommand;

use super::{parse_amount, parse_date, parse_type, today, FilterArgs};
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{NestError, NestResult};
use crate::models::NewTransaction;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Short title
        title: String,
        /// Amount (e.g., "89.50")
        amount: String,
        /// Category name (must exist for the type)
        #[arg(short, long)]
        category: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Transaction date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
    },

    /// List transactions, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of transactions to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Show every matching transaction
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },

    /// Show transaction details
    Show {
        /// Transaction ID (short or full)
        transaction: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID (short or full)
        transaction: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// Remove the description
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (short or full)
        transaction: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> NestResult<()> {
    let mut book = storage.load_book()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            title,
            amount,
            category,
            kind,
            date,
            description,
        } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let mut draft =
                NewTransaction::new(title, parse_amount(&amount)?, category, date, parse_type(&kind)?);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }

            let txn = book.add_transaction(draft)?;
            storage.save_book(&book)?;
            storage.log_create(&txn)?;

            println!("Added transaction: {}", txn.title);
            println!("  Amount: {}", txn.amount.format_with_symbol(symbol));
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List { filter, limit, all } => {
            let options = filter.to_options()?;
            let matching = book.filtered(&options);
            let shown = if all {
                matching.len()
            } else {
                limit.unwrap_or(settings.recent_limit)
            };

            let page: Vec<_> = matching.iter().take(shown).copied().collect();
            print!(
                "{}",
                format_transaction_register(&page, symbol, &settings.date_format)
            );
            if page.len() < matching.len() {
                println!(
                    "Showing {} of {} transactions. Use --all to see everything.",
                    page.len(),
                    matching.len()
                );
            }
        }

        TransactionCommands::Show { transaction } => {
            let txn = book.find_transaction(&transaction)?;
            print!(
                "{}",
                format_transaction_details(txn, symbol, &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            transaction,
            title,
            amount,
            category,
            kind,
            date,
            description,
            clear_description,
        } => {
            if title.is_none()
                && amount.is_none()
                && category.is_none()
                && kind.is_none()
                && date.is_none()
                && description.is_none()
                && !clear_description
            {
                println!("No changes specified. Use --title, --amount, --category, --type, --date or --description.");
                return Ok(());
            }

            let mut txn = book.find_transaction(&transaction)?.clone();
            if let Some(title) = title {
                txn.title = title;
            }
            if let Some(amount) = amount {
                txn.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                txn.category = category;
            }
            if let Some(kind) = kind {
                txn.kind = parse_type(&kind)?;
            }
            if let Some(date) = date {
                txn.date = parse_date(&date)?;
            }
            if clear_description {
                txn.description = None;
            } else if let Some(description) = description {
                txn.description = Some(description);
            }

            let id = txn.id;
            let before = book.update_transaction(txn)?;
            let after = book
                .ledger()
                .get(id)
                .cloned()
                .ok_or_else(|| NestError::transaction_not_found(id.to_string()))?;
            storage.save_book(&book)?;
            storage.log_update(&before, &after)?;

            println!("Updated transaction: {}", after.title);
        }

        TransactionCommands::Delete { transaction } => {
            let id = book.find_transaction(&transaction)?.id;
            let removed = book.remove_transaction(id)?;
            storage.save_book(&book)?;
            storage.log_delete(&removed)?;

            println!("Deleted transaction: {} ({})", removed.title, removed.id);
        }
    }

    Ok(())
}
