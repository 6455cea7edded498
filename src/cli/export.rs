//! CLI command for data export
//!
//! Writes the (optionally filtered) transactions as CSV or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use super::{today, FilterArgs};
use crate::error::{NestError, NestResult};
use crate::export::{export_book, ExportFormat};
use crate::storage::Storage;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format: csv or json
    #[arg(short, long, default_value = "csv")]
    pub format: String,

    /// Output file path (default: the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> NestResult<()> {
    let format: ExportFormat = args.format.parse().map_err(NestError::Validation)?;
    let options = args.filter.to_options()?;
    let book = storage.load_book()?;

    let output = match args.output {
        Some(path) => path,
        None => {
            let dir = storage.paths().export_dir();
            std::fs::create_dir_all(&dir)?;
            dir.join(format!(
                "transactions-{}.{}",
                today().format("%Y-%m-%d"),
                format.extension()
            ))
        }
    };

    let file = File::create(&output).map_err(|e| {
        NestError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    let count = export_book(&book, &options, format, &mut writer)?;
    writer.flush()?;

    println!(
        "Exported {} transactions as {} to: {}",
        count,
        format,
        output.display()
    );

    Ok(())
}
