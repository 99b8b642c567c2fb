mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "teller",
    version,
    about = "Extract and reconcile transactions from bank statement PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the transaction table from a statement PDF
    Extract {
        /// Path to the statement PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write extracted output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Fail if fewer than this many rows were matched in the table
        #[arg(long, default_value_t = 1)]
        min_rows: usize,

        /// Fail if more than this many rows were accepted
        #[arg(long, default_value_t = 2000)]
        max_rows: usize,
    },
    /// Check that a statement reconciles, without printing the ledger
    Check {
        /// Path to the statement PDF
        input_file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            out,
            min_rows,
            max_rows,
        } => commands::extract::run(input_file, &output, out, min_rows, max_rows),
        Commands::Check { input_file } => commands::check::run(input_file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
