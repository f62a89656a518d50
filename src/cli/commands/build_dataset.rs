//! Build-dataset command: construct and report the training table

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{BuildDatasetArgs, Config};
use crate::dataset::build_dataset;

pub fn run_build_dataset(
    args: BuildDatasetArgs,
    config: &Config,
    level: LogLevel,
) -> Result<(), String> {
    let store = config.open_store().map_err(|e| format!("{e}"))?;
    let dataset = build_dataset(store.as_ref()).map_err(|e| format!("Dataset error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Training table built: {} issuance rows, {} kept, {} excluded (zero or missing students present)",
            dataset.report.rows_total, dataset.report.rows_kept, dataset.report.rows_excluded
        ),
    );

    for row in dataset.rows.iter().take(args.limit) {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{} | {} | {} | {} {} / {} students = {:.4} per student",
                row.date,
                row.hostel,
                row.ingredient_name,
                row.quantity_issued,
                row.unit,
                row.students_present,
                row.per_student_qty
            ),
        );
    }
    Ok(())
}
