//! Load command: CSV files into the SQLite record store

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{Config, LoadArgs};
use crate::store::SqliteStore;

pub fn run_load(args: LoadArgs, config: &Config, level: LogLevel) -> Result<(), String> {
    let Some(db_path) = config.sqlite_path() else {
        return Err(
            "load requires a sqlite source; the configured source is a CSV directory".to_string(),
        );
    };

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Loading CSV tables from {} into {}",
            args.data_dir.display(),
            db_path.display()
        ),
    );

    let mut store = SqliteStore::open(db_path).map_err(|e| format!("{e}"))?;
    let report = store
        .ingest_csv_dir(&args.data_dir)
        .map_err(|e| format!("Load error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("{} attendance rows inserted", report.attendance_rows),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("{} ingredient-issuance rows inserted", report.issuance_rows),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "{} future-absentee rows inserted",
            report.future_absentee_rows
        ),
    );
    Ok(())
}
