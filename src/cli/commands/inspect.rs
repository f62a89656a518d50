//! Inspect command: preview the three source tables

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{Config, InspectArgs};
use crate::store::RecordStore;

pub fn run_inspect(args: InspectArgs, config: &Config, level: LogLevel) -> Result<(), String> {
    let store = config.open_store().map_err(|e| format!("{e}"))?;

    let attendance = store.attendance().map_err(|e| format!("{e}"))?;
    log(level, LogLevel::Normal, "--- Attendance ---");
    for row in attendance.iter().take(args.limit) {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{} | {} | total {} | present {} | absent {}",
                row.date, row.hostel, row.total_students, row.students_present, row.students_absent
            ),
        );
    }
    log(
        level,
        LogLevel::Normal,
        &format!("({} rows)\n", attendance.len()),
    );

    let issuance = store.ingredients_issued().map_err(|e| format!("{e}"))?;
    log(level, LogLevel::Normal, "--- Ingredients Issued ---");
    for row in issuance.iter().take(args.limit) {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{} | {} | {} ({}) | {} {}",
                row.date,
                row.hostel,
                row.ingredient_name,
                row.ingredient_category,
                row.quantity_issued,
                row.unit
            ),
        );
    }
    log(
        level,
        LogLevel::Normal,
        &format!("({} rows)\n", issuance.len()),
    );

    let future = store.future_absentees().map_err(|e| format!("{e}"))?;
    log(level, LogLevel::Normal, "--- Future Absentees ---");
    for row in future.iter().take(args.limit) {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{} | {} | expected {} | {}",
                row.date, row.hostel, row.expected_absentees, row.reason
            ),
        );
    }
    log(
        level,
        LogLevel::Normal,
        &format!("({} rows)", future.len()),
    );
    Ok(())
}
