//! Predict command: per-ingredient forecasts for a date

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{Config, PredictArgs};
use crate::predict::{PredictionTable, Predictor};

pub fn run_predict(args: PredictArgs, config: &Config, level: LogLevel) -> Result<(), String> {
    // Fail fast on a missing or partial artifact set, before touching data.
    let bundle = config
        .artifact_store()
        .load()
        .map_err(|e| format!("{e}"))?;
    let predictor = Predictor::new(bundle);

    let store = config.open_store().map_err(|e| format!("{e}"))?;
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    log(
        level,
        LogLevel::Normal,
        &format!("Predictions for {date}"),
    );

    match args.hostel {
        Some(hostel) => {
            let table = predictor
                .predict_for(store.as_ref(), date, &hostel, args.students)
                .map_err(|e| format!("Prediction error: {e}"))?;
            print_table(&hostel, &table, level);
        }
        None => {
            let forecasts = predictor
                .predict_date(store.as_ref(), date)
                .map_err(|e| format!("Prediction error: {e}"))?;
            if forecasts.is_empty() {
                log(
                    level,
                    LogLevel::Normal,
                    &format!("No attendance data found for {date}"),
                );
                return Ok(());
            }
            for forecast in forecasts {
                match forecast.outcome {
                    Ok(table) => print_table(&forecast.hostel, &table, level),
                    Err(e) => log(
                        level,
                        LogLevel::Normal,
                        &format!("Skipping {}: {e}", forecast.hostel),
                    ),
                }
            }
        }
    }
    Ok(())
}

fn print_table(hostel: &str, table: &PredictionTable, level: LogLevel) {
    for (ingredient, prediction) in table {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{hostel} | {ingredient:12} -> {:.2} total ({:.4} per student)",
                prediction.total_qty, prediction.per_student_qty
            ),
        );
    }
}
