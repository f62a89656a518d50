//! CLI argument definitions

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Abastecer: hostel mess provisioning forecasts
#[derive(Parser, Debug, Clone)]
#[command(name = "abastecer")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Estimate per-student ingredient consumption and forecast provisioning needs")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to a YAML config file (defaults to ./abastecer.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load the three CSV tables into the SQLite record store
    Load(LoadArgs),

    /// Preview the first rows of each source table
    Inspect(InspectArgs),

    /// Build the training table and report the join accounting
    BuildDataset(BuildDatasetArgs),

    /// Build the dataset, fit the model, and persist the artifact bundle
    Train(TrainArgs),

    /// Predict per-ingredient quantities for a date and hostel
    Predict(PredictArgs),

    /// Show record-store and artifact status
    Info(InfoArgs),
}

/// Arguments for the load command
#[derive(Parser, Debug, Clone)]
pub struct LoadArgs {
    /// Directory containing attendance.csv, ingredients_issued.csv,
    /// future_absentees.csv
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Rows to show per table
    #[arg(short = 'n', long, default_value_t = 5)]
    pub limit: usize,
}

/// Arguments for the build-dataset command
#[derive(Parser, Debug, Clone)]
pub struct BuildDatasetArgs {
    /// Rows of the built table to print
    #[arg(short = 'n', long, default_value_t = 5)]
    pub limit: usize,
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Override the number of trees
    #[arg(long)]
    pub n_trees: Option<usize>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the maximum tree depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Build and validate the dataset but skip fitting and saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the predict command
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Date to predict for (YYYY-MM-DD; defaults to today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Hostel code; when omitted, predicts for every hostel with attendance
    /// on the date
    #[arg(long)]
    pub hostel: Option<String>,

    /// Students present; when omitted, looked up from the record store
    #[arg(short, long)]
    pub students: Option<u32>,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_train_overrides() {
        let cli = Cli::try_parse_from(["abastecer", "train", "--n-trees", "10", "--seed", "7"])
            .unwrap();
        match cli.command {
            Command::Train(args) => {
                assert_eq!(args.n_trees, Some(10));
                assert_eq!(args.seed, Some(7));
                assert!(!args.dry_run);
            }
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_predict_date() {
        let cli = Cli::try_parse_from([
            "abastecer",
            "predict",
            "--date",
            "2024-01-01",
            "--hostel",
            "H1",
        ])
        .unwrap();
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(
                    args.date,
                    Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                );
                assert_eq!(args.hostel.as_deref(), Some("H1"));
                assert_eq!(args.students, None);
            }
            other => panic!("expected predict, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["abastecer", "predict", "--date", "01-2024"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["abastecer", "info", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
