//! Category CLI commands
//!
//! Implements CLI commands for the income and expense category lists.

use clap::Subcommand;

use super::parse_type;
use crate::config::Settings;
use crate::display::{format_category_details, format_category_tree};
use crate::error::NestResult;
use crate::models::CategoryUpdate;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories (grouped by type)
    List,

    /// Add a custom category
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Color tag (default: configured default color)
        #[arg(long, default_value = "")]
        color: String,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color tag
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a custom category (transactions keep their label)
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> NestResult<()> {
    let mut book = storage.load_book()?;
    book.set_default_category_color(settings.default_category_color.as_str());

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_tree(book.categories()));
        }

        CategoryCommands::Add { name, kind, color } => {
            let category = book.add_category(&name, parse_type(&kind)?, &color)?;
            storage.save_book(&book)?;
            storage.log_create(&category)?;

            println!("Created category: {}", category.name);
            println!("  Type: {}", category.kind);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let cat = book.find_category(&category)?;
            print!("{}", format_category_details(cat));
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            let before = book.find_category(&category)?.clone();

            let mut update = CategoryUpdate::default();
            if let Some(name) = name {
                update = update.name(name);
            }
            if let Some(color) = color {
                update = update.color(color);
            }
            if update.is_empty() {
                println!("No changes specified. Use --name or --color.");
                return Ok(());
            }

            let after = book.update_category(before.id, update)?;
            storage.save_book(&book)?;
            storage.log_update(&before, &after)?;

            println!("Updated category: {}", after.name);
        }

        CategoryCommands::Delete { category } => {
            let id = book.find_category(&category)?.id;
            let removed = book.remove_category(id)?;
            storage.save_book(&book)?;
            storage.log_delete(&removed)?;

            println!("Deleted category: {}", removed.name);
        }
    }

    Ok(())
}
