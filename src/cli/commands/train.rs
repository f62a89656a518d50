//! Train command: build the dataset, fit the model, persist the bundle

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{Config, TrainArgs};
use crate::dataset::build_dataset;
use crate::train::train;

pub fn run_train(args: TrainArgs, config: &Config, level: LogLevel) -> Result<(), String> {
    let store = config.open_store().map_err(|e| format!("{e}"))?;

    log(level, LogLevel::Normal, "Building training table...");
    let dataset = build_dataset(store.as_ref()).map_err(|e| format!("Dataset error: {e}"))?;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "{} rows kept, {} excluded",
            dataset.report.rows_kept, dataset.report.rows_excluded
        ),
    );

    let mut forest = config.forest;
    if let Some(n) = args.n_trees {
        forest.n_trees = n;
    }
    if let Some(seed) = args.seed {
        forest.seed = seed;
    }
    if let Some(depth) = args.max_depth {
        forest.max_depth = depth;
    }

    if args.dry_run {
        log(
            level,
            LogLevel::Normal,
            "Dry run - dataset validated, skipping fit",
        );
        return Ok(());
    }

    let (bundle, report) = train(&dataset, &forest).map_err(|e| format!("Training error: {e}"))?;

    let artifacts = config.artifact_store();
    artifacts
        .save(&bundle)
        .map_err(|e| format!("Artifact error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Model trained over {} rows ({} hostels, {} ingredients)",
            report.rows_used, report.hostels, report.ingredients
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Forest: {} trees, seed {}, max depth {}",
            forest.n_trees, forest.seed, forest.max_depth
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Training MSE: {:.6}", report.training_mse),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Artifacts written to {}", artifacts.dir().display()),
    );
    Ok(())
}
