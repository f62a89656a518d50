//! Persisted model/encoder artifact set
//!
//! The trained model and its two encoders are a single unit: they were fit
//! together and are only valid together. [`ArtifactStore::save`] stages the
//! whole set in a temporary directory and swaps it into place with a rename,
//! so a failed save leaves the previous bundle intact and a reader never
//! observes a partially written set.

use crate::encoding::CategoryEncoder;
use crate::forest::{ForestConfig, RandomForestRegressor};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MODEL_FILE: &str = "model.json";
const HOSTEL_ENCODER_FILE: &str = "hostel_encoder.json";
const INGREDIENT_ENCODER_FILE: &str = "ingredient_encoder.json";
const METADATA_FILE: &str = "metadata.json";

/// Provenance recorded alongside the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub trained_at: DateTime<Utc>,
    pub rows_used: usize,
    pub rows_excluded: usize,
    pub forest: ForestConfig,
}

/// The (model, hostel encoder, ingredient encoder) triple, always together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub model: RandomForestRegressor,
    pub hostels: CategoryEncoder,
    pub ingredients: CategoryEncoder,
    pub metadata: ArtifactMetadata,
}

/// Filesystem location of a persisted bundle
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory the bundle lives in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a complete bundle is present
    pub fn exists(&self) -> bool {
        self.missing_files().is_empty()
    }

    /// Write the bundle atomically, replacing any previous one
    pub fn save(&self, bundle: &ArtifactBundle) -> Result<()> {
        let parent = self.dir.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".artifacts-staging-")
            .tempdir_in(parent)?;

        write_json(&staging.path().join(MODEL_FILE), &bundle.model)?;
        write_json(&staging.path().join(HOSTEL_ENCODER_FILE), &bundle.hostels)?;
        write_json(
            &staging.path().join(INGREDIENT_ENCODER_FILE),
            &bundle.ingredients,
        )?;
        write_json(&staging.path().join(METADATA_FILE), &bundle.metadata)?;

        // Swap: the old set stays intact until every file is written.
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        fs::rename(staging.into_path(), &self.dir)?;
        Ok(())
    }

    /// Load the bundle, failing fast when the set is missing or partial
    pub fn load(&self) -> Result<ArtifactBundle> {
        if !self.dir.exists() {
            return Err(Error::ArtifactInconsistent(format!(
                "no trained artifacts at {}; run `train` first",
                self.dir.display()
            )));
        }
        let missing = self.missing_files();
        if !missing.is_empty() {
            return Err(Error::ArtifactInconsistent(format!(
                "artifact set at {} is missing {}",
                self.dir.display(),
                missing.join(", ")
            )));
        }

        Ok(ArtifactBundle {
            model: read_json(&self.dir.join(MODEL_FILE))?,
            hostels: read_json(&self.dir.join(HOSTEL_ENCODER_FILE))?,
            ingredients: read_json(&self.dir.join(INGREDIENT_ENCODER_FILE))?,
            metadata: read_json(&self.dir.join(METADATA_FILE))?,
        })
    }

    fn missing_files(&self) -> Vec<&'static str> {
        [
            MODEL_FILE,
            HOSTEL_ENCODER_FILE,
            INGREDIENT_ENCODER_FILE,
            METADATA_FILE,
        ]
        .into_iter()
        .filter(|f| !self.dir.join(f).exists())
        .collect()
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Serialization(format!("cannot serialize {}: {e}", path.display())))?;
    fs::write(path, data)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|e| Error::Serialization(format!("cannot parse {}: {e}", path.display())))
}
