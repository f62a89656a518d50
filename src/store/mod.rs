//! Record store backends
//!
//! A [`RecordStore`] exposes the three source tables (attendance,
//! ingredients issued, future absentees) behind one capability so the
//! pipeline runs unchanged over SQLite, a directory of CSV files, or an
//! in-memory fake in tests. Backend selection happens in configuration, not
//! in parallel copies of the pipeline.

mod csv;
mod memory;
mod sqlite;

pub use self::csv::CsvStore;
pub use self::memory::MemoryStore;
pub use self::sqlite::{IngestReport, SqliteStore};

use crate::records::{AttendanceRecord, FutureAbsentee, IngredientIssuance};
use crate::Result;
use chrono::NaiveDate;

/// Read access to the three source tables
pub trait RecordStore {
    /// All attendance rows
    fn attendance(&self) -> Result<Vec<AttendanceRecord>>;

    /// All ingredient-issuance rows
    fn ingredients_issued(&self) -> Result<Vec<IngredientIssuance>>;

    /// All future-absentee rows
    fn future_absentees(&self) -> Result<Vec<FutureAbsentee>>;

    /// Attendance rows for one date
    ///
    /// Backends with a query engine override this with a parameterized
    /// equality filter; the default filters the bulk load.
    fn attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        Ok(self
            .attendance()?
            .into_iter()
            .filter(|a| a.date == date)
            .collect())
    }

    /// The attendance row for one (date, hostel) key, if any
    fn attendance_for(&self, date: NaiveDate, hostel: &str) -> Result<Option<AttendanceRecord>> {
        Ok(self
            .attendance_on(date)?
            .into_iter()
            .find(|a| a.hostel == hostel))
    }
}
