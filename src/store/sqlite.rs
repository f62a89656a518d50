//! SQLite record store
//!
//! Owns schema initialization, transactional CSV ingestion, and parameterized
//! reads. Externally supplied dates and hostel names are always bound as
//! query parameters, never interpolated into SQL text.

use crate::records::{AttendanceRecord, FutureAbsentee, IngredientIssuance};
use crate::store::csv::{
    read_table, ATTENDANCE_FILE, FUTURE_ABSENTEES_FILE, INGREDIENTS_FILE,
};
use crate::store::RecordStore;
use crate::{Error, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS attendance (
    Date TEXT NOT NULL,
    Hostel TEXT NOT NULL,
    Total_Students INTEGER NOT NULL,
    Students_Present INTEGER NOT NULL,
    Students_Absent INTEGER NOT NULL,
    PRIMARY KEY (Date, Hostel)
);

CREATE TABLE IF NOT EXISTS ingredients_issued (
    Date TEXT NOT NULL,
    Hostel TEXT NOT NULL,
    Caterer_ID TEXT NOT NULL,
    Ingredient_Name TEXT NOT NULL,
    Ingredient_Category TEXT NOT NULL,
    Quantity_Issued REAL NOT NULL,
    Unit TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_ingredients_key ON ingredients_issued(Date, Hostel);

CREATE TABLE IF NOT EXISTS future_absentees (
    Date TEXT NOT NULL,
    Hostel TEXT NOT NULL,
    Expected_Absentees INTEGER NOT NULL,
    Reason TEXT NOT NULL,
    PRIMARY KEY (Date, Hostel)
);
";

/// Row counts inserted by one CSV ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub attendance_rows: usize,
    pub issuance_rows: usize,
    pub future_absentee_rows: usize,
}

/// A record store backed by a SQLite database
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and initialize the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(|e| {
            Error::DataUnavailable(format!(
                "cannot open database {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::DataUnavailable(format!("cannot open in-memory database: {e}")))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(db_err)?;
        conn.execute_batch(SCHEMA_SQL).map_err(db_err)?;
        Ok(Self { conn })
    }

    /// Load the three CSV tables from `dir` into the database
    ///
    /// All inserts run inside one transaction; a bad row aborts the whole
    /// load and leaves the database unchanged.
    pub fn ingest_csv_dir(&mut self, dir: &Path) -> Result<IngestReport> {
        let attendance: Vec<AttendanceRecord> = read_table(&dir.join(ATTENDANCE_FILE))?;
        let issuance: Vec<IngredientIssuance> = read_table(&dir.join(INGREDIENTS_FILE))?;
        let future: Vec<FutureAbsentee> = read_table(&dir.join(FUTURE_ABSENTEES_FILE))?;

        let tx = self.conn.transaction().map_err(db_err)?;

        for row in &attendance {
            tx.execute(
                "INSERT OR REPLACE INTO attendance
                 (Date, Hostel, Total_Students, Students_Present, Students_Absent)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    row.date.to_string(),
                    row.hostel,
                    row.total_students,
                    row.students_present,
                    row.students_absent,
                ],
            )
            .map_err(db_err)?;
        }

        for row in &issuance {
            tx.execute(
                "INSERT INTO ingredients_issued
                 (Date, Hostel, Caterer_ID, Ingredient_Name, Ingredient_Category, Quantity_Issued, Unit)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    row.date.to_string(),
                    row.hostel,
                    row.caterer_id,
                    row.ingredient_name,
                    row.ingredient_category,
                    row.quantity_issued,
                    row.unit,
                ],
            )
            .map_err(db_err)?;
        }

        for row in &future {
            tx.execute(
                "INSERT OR REPLACE INTO future_absentees
                 (Date, Hostel, Expected_Absentees, Reason)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    row.date.to_string(),
                    row.hostel,
                    row.expected_absentees,
                    row.reason,
                ],
            )
            .map_err(db_err)?;
        }

        tx.commit().map_err(db_err)?;

        Ok(IngestReport {
            attendance_rows: attendance.len(),
            issuance_rows: issuance.len(),
            future_absentee_rows: future.len(),
        })
    }

    /// Row counts of the three tables, for the info command
    pub fn table_counts(&self) -> Result<(usize, usize, usize)> {
        let count = |table: &str| -> Result<usize> {
            // Table names come from this module, never from user input.
            let sql = format!("SELECT COUNT(*) FROM {table}");
            let n: i64 = self
                .conn
                .query_row(&sql, [], |row| row.get(0))
                .map_err(db_err)?;
            Ok(n as usize)
        };
        Ok((
            count("attendance")?,
            count("ingredients_issued")?,
            count("future_absentees")?,
        ))
    }

    fn query_attendance(
        &self,
        sql: &str,
        binds: &[&dyn rusqlite::types::ToSql],
    ) -> Result<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(sql).map_err(db_err)?;
        let raw = stmt
            .query_map(binds, |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, u32>(4)?,
                ))
            })
            .map_err(db_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)?;

        raw.into_iter()
            .map(|(date, hostel, total, present, absent)| {
                Ok(AttendanceRecord {
                    date: parse_date(&date)?,
                    hostel,
                    total_students: total,
                    students_present: present,
                    students_absent: absent,
                })
            })
            .collect()
    }
}

impl RecordStore for SqliteStore {
    fn attendance(&self) -> Result<Vec<AttendanceRecord>> {
        self.query_attendance(
            "SELECT Date, Hostel, Total_Students, Students_Present, Students_Absent
             FROM attendance",
            &[],
        )
    }

    fn ingredients_issued(&self) -> Result<Vec<IngredientIssuance>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT Date, Hostel, Caterer_ID, Ingredient_Name, Ingredient_Category,
                        Quantity_Issued, Unit
                 FROM ingredients_issued",
            )
            .map_err(db_err)?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })
            .map_err(db_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)?;

        raw.into_iter()
            .map(|(date, hostel, caterer, name, category, qty, unit)| {
                Ok(IngredientIssuance {
                    date: parse_date(&date)?,
                    hostel,
                    caterer_id: caterer,
                    ingredient_name: name,
                    ingredient_category: category,
                    quantity_issued: qty,
                    unit,
                })
            })
            .collect()
    }

    fn future_absentees(&self) -> Result<Vec<FutureAbsentee>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT Date, Hostel, Expected_Absentees, Reason
                 FROM future_absentees",
            )
            .map_err(db_err)?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(db_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)?;

        raw.into_iter()
            .map(|(date, hostel, expected, reason)| {
                Ok(FutureAbsentee {
                    date: parse_date(&date)?,
                    hostel,
                    expected_absentees: expected,
                    reason,
                })
            })
            .collect()
    }

    fn attendance_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        self.query_attendance(
            "SELECT Date, Hostel, Total_Students, Students_Present, Students_Absent
             FROM attendance WHERE Date = ?1",
            &[&date.to_string()],
        )
    }

    fn attendance_for(&self, date: NaiveDate, hostel: &str) -> Result<Option<AttendanceRecord>> {
        let rows = self.query_attendance(
            "SELECT Date, Hostel, Total_Students, Students_Present, Students_Absent
             FROM attendance WHERE Date = ?1 AND Hostel = ?2",
            &[&date.to_string(), &hostel],
        )?;
        Ok(rows.into_iter().next())
    }
}

fn db_err(e: rusqlite::Error) -> Error {
    Error::DataUnavailable(format!("database error: {e}"))
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| Error::Serialization(format!("bad date '{text}' in database: {e}")))
}
