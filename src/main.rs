//! Abastecer CLI
//!
//! Provisioning-forecast entry point for hostel messes.
//!
//! # Usage
//!
//! ```bash
//! # Load the raw CSV tables into SQLite
//! abastecer load data/
//!
//! # Preview the source tables
//! abastecer inspect
//!
//! # Build the training table and report the join accounting
//! abastecer build-dataset
//!
//! # Fit the model and persist the artifact bundle
//! abastecer train --n-trees 100 --seed 42
//!
//! # Forecast every hostel with attendance on a date
//! abastecer predict --date 2024-01-01
//!
//! # Forecast one hostel with an explicit student count
//! abastecer predict --date 2024-01-01 --hostel H1 --students 100
//! ```

use abastecer::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
