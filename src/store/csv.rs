//! CSV-directory record store
//!
//! Reads the three tables from `attendance.csv`, `ingredients_issued.csv`,
//! and `future_absentees.csv` in one directory, with the original column
//! headers. Records deserialize through serde, so the schema lives in one
//! place ([`crate::records`]).

use crate::records::{AttendanceRecord, FutureAbsentee, IngredientIssuance};
use crate::store::RecordStore;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// File names expected inside the data directory
pub const ATTENDANCE_FILE: &str = "attendance.csv";
pub const INGREDIENTS_FILE: &str = "ingredients_issued.csv";
pub const FUTURE_ABSENTEES_FILE: &str = "future_absentees.csv";

/// A record store backed by a directory of CSV files
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Open a store over `dir`; files are validated lazily on read
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory this store reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn table_path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

impl RecordStore for CsvStore {
    fn attendance(&self) -> Result<Vec<AttendanceRecord>> {
        read_table(&self.table_path(ATTENDANCE_FILE))
    }

    fn ingredients_issued(&self) -> Result<Vec<IngredientIssuance>> {
        read_table(&self.table_path(INGREDIENTS_FILE))
    }

    fn future_absentees(&self) -> Result<Vec<FutureAbsentee>> {
        read_table(&self.table_path(FUTURE_ABSENTEES_FILE))
    }
}

/// Read one CSV table into serde-deserialized records
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::DataUnavailable(format!("cannot open {}: {e}", path.display())))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: T = record
            .map_err(|e| Error::Serialization(format!("bad row in {}: {e}", path.display())))?;
        rows.push(row);
    }
    Ok(rows)
}
