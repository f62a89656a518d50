//! Dataset builder: join the three source tables into model-ready rows
//!
//! Ingredient issuance is left-joined to attendance and future-absentee
//! records on (date, hostel), and the derived target
//! `per_student_qty = quantity_issued / students_present` is computed per
//! row. Rows whose attendance is missing or zero cannot yield a finite
//! target; they are excluded before training and counted in the
//! [`JoinReport`] rather than silently dropped.

use crate::records::{AttendanceRecord, FutureAbsentee, IngredientIssuance};
use crate::store::RecordStore;
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One issuance row joined with its attendance and expected-absence context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub date: NaiveDate,
    pub hostel: String,
    pub ingredient_name: String,
    pub ingredient_category: String,
    pub quantity_issued: f64,
    pub unit: String,
    pub students_present: u32,
    /// Informational only; never adjusts the student count
    pub expected_absentees: Option<u32>,
    pub absence_reason: Option<String>,
    /// quantity_issued / students_present
    pub per_student_qty: f64,
}

/// Accounting for the join: how many issuance rows survived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinReport {
    /// Issuance rows read from the store
    pub rows_total: usize,
    /// Rows with a usable (non-zero) attendance match
    pub rows_kept: usize,
    /// Rows excluded for zero or missing students present
    pub rows_excluded: usize,
}

/// The built training table plus its join accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub rows: Vec<TrainingRow>,
    pub report: JoinReport,
}

/// Build the training table from the three record collections
///
/// Pure transform aside from the store reads; rebuilt from scratch on every
/// call, never incrementally updated.
pub fn build_dataset(store: &dyn RecordStore) -> Result<Dataset> {
    let attendance = store.attendance()?;
    let issuance = store.ingredients_issued()?;
    let future = store.future_absentees()?;
    Ok(join_tables(&attendance, &issuance, &future))
}

/// Join already-loaded tables; exposed for tests and the inspect command
pub fn join_tables(
    attendance: &[AttendanceRecord],
    issuance: &[IngredientIssuance],
    future: &[FutureAbsentee],
) -> Dataset {
    let attendance_by_key: HashMap<(NaiveDate, &str), &AttendanceRecord> = attendance
        .iter()
        .map(|a| ((a.date, a.hostel.as_str()), a))
        .collect();
    let future_by_key: HashMap<(NaiveDate, &str), &FutureAbsentee> = future
        .iter()
        .map(|f| ((f.date, f.hostel.as_str()), f))
        .collect();

    let mut rows = Vec::with_capacity(issuance.len());
    let mut excluded = 0usize;

    for issued in issuance {
        let key = (issued.date, issued.hostel.as_str());
        let present = attendance_by_key.get(&key).map(|a| a.students_present);

        // A zero or absent divisor would make the target non-finite.
        let students_present = match present {
            Some(n) if n > 0 => n,
            _ => {
                excluded += 1;
                continue;
            }
        };

        let absentee = future_by_key.get(&key);
        rows.push(TrainingRow {
            date: issued.date,
            hostel: issued.hostel.clone(),
            ingredient_name: issued.ingredient_name.clone(),
            ingredient_category: issued.ingredient_category.clone(),
            quantity_issued: issued.quantity_issued,
            unit: issued.unit.clone(),
            students_present,
            expected_absentees: absentee.map(|f| f.expected_absentees),
            absence_reason: absentee.map(|f| f.reason.clone()),
            per_student_qty: issued.quantity_issued / f64::from(students_present),
        });
    }

    let report = JoinReport {
        rows_total: issuance.len(),
        rows_kept: rows.len(),
        rows_excluded: excluded,
    };
    Dataset { rows, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn attendance(d: u32, hostel: &str, present: u32) -> AttendanceRecord {
        AttendanceRecord {
            date: date(d),
            hostel: hostel.to_string(),
            total_students: present + 10,
            students_present: present,
            students_absent: 10,
        }
    }

    fn issuance(d: u32, hostel: &str, ingredient: &str, qty: f64) -> IngredientIssuance {
        IngredientIssuance {
            date: date(d),
            hostel: hostel.to_string(),
            caterer_id: "C01".to_string(),
            ingredient_name: ingredient.to_string(),
            ingredient_category: "Grain".to_string(),
            quantity_issued: qty,
            unit: "kg".to_string(),
        }
    }

    #[test]
    fn test_matched_rows_carry_attendance_and_exact_target() {
        let dataset = join_tables(
            &[attendance(1, "H1", 100)],
            &[issuance(1, "H1", "Rice", 50.0)],
            &[],
        );
        assert_eq!(dataset.rows.len(), 1);
        let row = &dataset.rows[0];
        assert_eq!(row.students_present, 100);
        assert_relative_eq!(row.per_student_qty, 0.5);
        assert_eq!(dataset.report.rows_kept, 1);
        assert_eq!(dataset.report.rows_excluded, 0);
    }

    #[test]
    fn test_missing_attendance_rows_are_excluded_and_counted() {
        let dataset = join_tables(
            &[attendance(1, "H1", 100)],
            &[
                issuance(1, "H1", "Rice", 50.0),
                issuance(2, "H1", "Rice", 40.0), // no attendance on day 2
                issuance(1, "H2", "Dal", 10.0),  // no attendance for H2
            ],
            &[],
        );
        assert_eq!(dataset.report.rows_total, 3);
        assert_eq!(dataset.report.rows_kept, 1);
        assert_eq!(dataset.report.rows_excluded, 2);
    }

    #[test]
    fn test_zero_students_present_is_excluded_not_infinite() {
        let dataset = join_tables(
            &[attendance(1, "H1", 0)],
            &[issuance(1, "H1", "Rice", 50.0)],
            &[],
        );
        assert!(dataset.rows.is_empty());
        assert_eq!(dataset.report.rows_excluded, 1);
    }

    #[test]
    fn test_future_absentees_join_is_informational() {
        let future = FutureAbsentee {
            date: date(1),
            hostel: "H1".to_string(),
            expected_absentees: 15,
            reason: "exam leave".to_string(),
        };
        let dataset = join_tables(
            &[attendance(1, "H1", 100)],
            &[issuance(1, "H1", "Rice", 50.0)],
            &[future],
        );
        let row = &dataset.rows[0];
        assert_eq!(row.expected_absentees, Some(15));
        assert_eq!(row.absence_reason.as_deref(), Some("exam leave"));
        // The divisor stays the observed attendance, not attendance minus
        // expected absences.
        assert_eq!(row.students_present, 100);
    }

    #[test]
    fn test_issuance_without_absentee_row_has_none() {
        let dataset = join_tables(
            &[attendance(1, "H1", 100)],
            &[issuance(1, "H1", "Rice", 50.0)],
            &[],
        );
        assert_eq!(dataset.rows[0].expected_absentees, None);
    }
}
