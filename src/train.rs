//! Encoder/model trainer
//!
//! Fits the two category encoders and the random-forest regressor from a
//! built [`Dataset`], producing an [`ArtifactBundle`] ready to persist.
//! Features are [encoded hostel, encoded ingredient, students present];
//! the target is per-student quantity.

use crate::artifacts::{ArtifactBundle, ArtifactMetadata};
use crate::dataset::Dataset;
use crate::encoding::CategoryEncoder;
use crate::forest::{ForestConfig, RandomForestRegressor};
use crate::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Summary of one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub rows_used: usize,
    pub rows_excluded: usize,
    pub hostels: usize,
    pub ingredients: usize,
    pub training_mse: f64,
}

/// Fit encoders and model over the dataset's kept rows
pub fn train(dataset: &Dataset, config: &ForestConfig) -> Result<(ArtifactBundle, TrainReport)> {
    if dataset.rows.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let hostels = CategoryEncoder::fit("hostel", dataset.rows.iter().map(|r| r.hostel.as_str()));
    let ingredients = CategoryEncoder::fit(
        "ingredient",
        dataset.rows.iter().map(|r| r.ingredient_name.as_str()),
    );

    let mut x = Vec::with_capacity(dataset.rows.len());
    let mut y = Vec::with_capacity(dataset.rows.len());
    for row in &dataset.rows {
        // Both values came out of the encoders' own fit set; encode cannot fail.
        let hostel_code = hostels.encode(&row.hostel)?;
        let ingredient_code = ingredients.encode(&row.ingredient_name)?;
        x.push(vec![
            hostel_code as f64,
            ingredient_code as f64,
            f64::from(row.students_present),
        ]);
        y.push(row.per_student_qty);
    }

    let model = RandomForestRegressor::fit(&x, &y, config)?;
    let training_mse = model.mse(&x, &y);

    let report = TrainReport {
        rows_used: dataset.report.rows_kept,
        rows_excluded: dataset.report.rows_excluded,
        hostels: hostels.len(),
        ingredients: ingredients.len(),
        training_mse,
    };
    let bundle = ArtifactBundle {
        model,
        hostels,
        ingredients,
        metadata: ArtifactMetadata {
            trained_at: Utc::now(),
            rows_used: report.rows_used,
            rows_excluded: report.rows_excluded,
            forest: *config,
        },
    };
    Ok((bundle, report))
}
