use anyhow::Result;
use clap::{Parser, Subcommand};

use nest::cli::{
    handle_audit_command, handle_budget_command, handle_category_command, handle_export_command,
    handle_report_command, handle_transaction_command, BudgetCommands, CategoryCommands,
    ExportArgs, ReportCommands, TransactionCommands,
};
use nest::config::{NestPaths, Settings};
use nest::storage::Storage;

#[derive(Parser)]
#[command(
    name = "nest",
    version,
    about = "Personal finance ledger for the terminal",
    long_about = "Nest Wealth records income and expenses, keeps per-type category \
                  lists, tracks spending budgets and reports on any filtered slice \
                  of your transactions."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Reports over (filtered) transactions
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export transactions to CSV or JSON
    Export(ExportArgs),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory with default settings and categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    nest::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = NestPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Txn(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing Nest Wealth at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let book = storage.load_book()?;
            storage.save_book(&book)?;
            println!("Initialization complete!");
            println!();
            println!(
                "{} default categories are ready. Run 'nest category list' to see them.",
                book.categories().len()
            );
        }
        Some(Commands::Config) => {
            println!("Nest Wealth Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Book file:        {}", paths.book_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol:        {}", settings.currency_symbol);
            println!("  Date format:            {}", settings.date_format);
            println!("  Default budget period:  {}", settings.default_budget_period);
            println!("  Default category color: {}", settings.default_category_color);
            println!("  Recent transactions:    {}", settings.recent_limit);
        }
        None => {
            println!("Nest Wealth - personal finance ledger");
            println!();
            println!("Run 'nest --help' for usage information.");
        }
    }

    Ok(())
}
