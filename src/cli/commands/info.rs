//! Info command: record-store and artifact status

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{Config, InfoArgs, SourceConfig};
use crate::store::RecordStore;

pub fn run_info(_args: InfoArgs, config: &Config, level: LogLevel) -> Result<(), String> {
    match &config.source {
        SourceConfig::Sqlite { path } => log(
            level,
            LogLevel::Normal,
            &format!("Source: sqlite database {}", path.display()),
        ),
        SourceConfig::Csv { dir } => log(
            level,
            LogLevel::Normal,
            &format!("Source: CSV directory {}", dir.display()),
        ),
    }

    match config.open_store() {
        Ok(store) => {
            let attendance = store.attendance().map(|r| r.len());
            let issuance = store.ingredients_issued().map(|r| r.len());
            let future = store.future_absentees().map(|r| r.len());
            match (attendance, issuance, future) {
                (Ok(a), Ok(i), Ok(f)) => log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "Tables: {a} attendance, {i} ingredient-issuance, {f} future-absentee rows"
                    ),
                ),
                _ => log(
                    level,
                    LogLevel::Normal,
                    "Tables: not readable (store empty or unreachable)",
                ),
            }
        }
        Err(e) => log(level, LogLevel::Normal, &format!("Store unreachable: {e}")),
    }

    let artifacts = config.artifact_store();
    if !artifacts.exists() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Artifacts: none at {} (run `train`)",
                artifacts.dir().display()
            ),
        );
        return Ok(());
    }

    let bundle = artifacts.load().map_err(|e| format!("{e}"))?;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Artifacts: trained {} over {} rows ({} excluded)",
            bundle.metadata.trained_at.format("%Y-%m-%d %H:%M UTC"),
            bundle.metadata.rows_used,
            bundle.metadata.rows_excluded
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Vocabulary: {} hostels, {} ingredients",
            bundle.hostels.len(),
            bundle.ingredients.len()
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "Forest: {} trees, seed {}, max depth {}",
            bundle.metadata.forest.n_trees,
            bundle.metadata.forest.seed,
            bundle.metadata.forest.max_depth
        ),
    );
    Ok(())
}
