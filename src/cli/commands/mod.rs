//! CLI command implementations

mod build_dataset;
mod info;
mod inspect;
mod load;
mod predict;
mod train;

use crate::cli::LogLevel;
use crate::config::{load_config, Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let level = LogLevel::from_flags(cli.verbose, cli.quiet);
    let config = load_config(cli.config.as_deref()).map_err(|e| format!("{e}"))?;

    match cli.command {
        Command::Load(args) => load::run_load(args, &config, level),
        Command::Inspect(args) => inspect::run_inspect(args, &config, level),
        Command::BuildDataset(args) => build_dataset::run_build_dataset(args, &config, level),
        Command::Train(args) => train::run_train(args, &config, level),
        Command::Predict(args) => predict::run_predict(args, &config, level),
        Command::Info(args) => info::run_info(args, &config, level),
    }
}
