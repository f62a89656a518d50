//! Predictor over a loaded artifact bundle
//!
//! Encodes each query exactly as the trainer encoded its rows, then asks the
//! model for a per-student rate for every ingredient in the training
//! vocabulary. Prediction is exhaustive over that vocabulary, not filtered to
//! ingredients historically issued at the queried hostel. Total quantity is
//! the rate multiplied by students present; a zero student count yields zero
//! totals without any division.

use crate::artifacts::ArtifactBundle;
use crate::store::RecordStore;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-ingredient prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub per_student_qty: f64,
    pub total_qty: f64,
}

/// Ingredient name -> prediction, lexicographically ordered for stable output
pub type PredictionTable = BTreeMap<String, Prediction>;

/// One hostel's forecast within a date batch
#[derive(Debug)]
pub struct HostelForecast {
    pub hostel: String,
    pub students_present: u32,
    /// Per-query outcome; an unknown hostel fails here without aborting the batch
    pub outcome: Result<PredictionTable>,
}

/// A predictor bound to one artifact bundle
///
/// The bundle is passed in explicitly, so tests inject fakes and multiple
/// artifact versions can coexist in-process.
#[derive(Debug, Clone)]
pub struct Predictor {
    bundle: ArtifactBundle,
}

impl Predictor {
    pub fn new(bundle: ArtifactBundle) -> Self {
        Self { bundle }
    }

    /// The bundle this predictor serves
    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Predict every ingredient for one hostel and student count
    pub fn predict(&self, hostel: &str, students_present: u32) -> Result<PredictionTable> {
        let hostel_code = self.bundle.hostels.encode(hostel)?;

        let mut table = PredictionTable::new();
        for ingredient in self.bundle.ingredients.classes() {
            let ingredient_code = self.bundle.ingredients.encode(ingredient)?;
            let per_student = self.bundle.model.predict(&[
                hostel_code as f64,
                ingredient_code as f64,
                f64::from(students_present),
            ]);
            table.insert(
                ingredient.clone(),
                Prediction {
                    per_student_qty: per_student,
                    total_qty: per_student * f64::from(students_present),
                },
            );
        }
        Ok(table)
    }

    /// Predict for one (date, hostel), looking up attendance when the student
    /// count is not supplied
    pub fn predict_for(
        &self,
        store: &dyn RecordStore,
        date: NaiveDate,
        hostel: &str,
        students_present: Option<u32>,
    ) -> Result<PredictionTable> {
        let students = match students_present {
            Some(n) => n,
            None => {
                let record =
                    store
                        .attendance_for(date, hostel)?
                        .ok_or_else(|| Error::AttendanceNotFound {
                            date,
                            hostel: hostel.to_string(),
                        })?;
                record.students_present
            }
        };
        self.predict(hostel, students)
    }

    /// Predict for every hostel with an attendance row on `date`
    ///
    /// Per-hostel failures (e.g. a hostel added after training) are carried
    /// in each [`HostelForecast`] instead of aborting the batch.
    pub fn predict_date(
        &self,
        store: &dyn RecordStore,
        date: NaiveDate,
    ) -> Result<Vec<HostelForecast>> {
        let rows = store.attendance_on(date)?;
        Ok(rows
            .into_iter()
            .map(|row| HostelForecast {
                outcome: self.predict(&row.hostel, row.students_present),
                hostel: row.hostel,
                students_present: row.students_present,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::join_tables;
    use crate::forest::ForestConfig;
    use crate::records::{AttendanceRecord, IngredientIssuance};
    use crate::store::MemoryStore;
    use crate::train::train;
    use approx::assert_relative_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn attendance(d: u32, hostel: &str, present: u32) -> AttendanceRecord {
        AttendanceRecord {
            date: date(d),
            hostel: hostel.to_string(),
            total_students: present + 5,
            students_present: present,
            students_absent: 5,
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

    fn trained_predictor() -> Predictor {
        let dataset = join_tables(
            &[attendance(1, "H1", 100)],
            &[
                issuance(1, "H1", "Rice", 50.0),
                issuance(1, "H1", "Dal", 10.0),
            ],
            &[],
        );
        let (bundle, _) = train(&dataset, &ForestConfig::default()).unwrap();
        Predictor::new(bundle)
    }

    #[test]
    fn test_prediction_is_exhaustive_and_ordered() {
        let predictor = trained_predictor();
        let table = predictor.predict("H1", 100).unwrap();
        let names: Vec<_> = table.keys().cloned().collect();
        assert_eq!(names, vec!["Dal", "Rice"]);
    }

    #[test]
    fn test_total_is_rate_times_students() {
        let predictor = trained_predictor();
        let table = predictor.predict("H1", 100).unwrap();
        let rice = table["Rice"];
        assert_relative_eq!(rice.per_student_qty, 0.5, epsilon = 1e-9);
        assert_relative_eq!(rice.total_qty, 50.0, epsilon = 1e-6);
    }

    #[test]
    fn test_unknown_hostel_yields_no_partial_output() {
        let predictor = trained_predictor();
        let err = predictor.predict("H9", 100).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownCategory { kind: "hostel", .. }
        ));
    }

    #[test]
    fn test_zero_students_means_zero_totals() {
        let predictor = trained_predictor();
        let table = predictor.predict("H1", 0).unwrap();
        assert!(!table.is_empty());
        for prediction in table.values() {
            assert_relative_eq!(prediction.total_qty, 0.0);
        }
    }

    #[test]
    fn test_students_looked_up_from_store() {
        let predictor = trained_predictor();
        let store = MemoryStore::new().with_attendance(vec![attendance(2, "H1", 60)]);

        let table = predictor.predict_for(&store, date(2), "H1", None).unwrap();
        let rice = table["Rice"];
        assert_relative_eq!(rice.total_qty, rice.per_student_qty * 60.0);
    }

    #[test]
    fn test_missing_attendance_is_not_found() {
        let predictor = trained_predictor();
        let store = MemoryStore::new();
        let err = predictor
            .predict_for(&store, date(2), "H1", None)
            .unwrap_err();
        assert!(matches!(err, Error::AttendanceNotFound { .. }));
    }

    #[test]
    fn test_explicit_student_count_skips_lookup() {
        let predictor = trained_predictor();
        let store = MemoryStore::new(); // empty; must not be consulted
        let table = predictor
            .predict_for(&store, date(2), "H1", Some(80))
            .unwrap();
        assert!(table.contains_key("Rice"));
    }

    #[test]
    fn test_date_batch_survives_unknown_hostel() {
        let predictor = trained_predictor();
        let store = MemoryStore::new().with_attendance(vec![
            attendance(2, "H1", 100),
            attendance(2, "H9", 50), // not in training vocabulary
        ]);

        let forecasts = predictor.predict_date(&store, date(2)).unwrap();
        assert_eq!(forecasts.len(), 2);

        let by_hostel: std::collections::HashMap<_, _> = forecasts
            .iter()
            .map(|f| (f.hostel.as_str(), &f.outcome))
            .collect();
        assert!(by_hostel["H1"].is_ok());
        assert!(matches!(
            by_hostel["H9"],
            Err(Error::UnknownCategory { .. })
        ));
    }
}
