//! In-memory record store for tests and fake injection

use crate::records::{AttendanceRecord, FutureAbsentee, IngredientIssuance};
use crate::store::RecordStore;
use crate::Result;

/// A record store holding its tables in plain vectors
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    attendance: Vec<AttendanceRecord>,
    issuance: Vec<IngredientIssuance>,
    future: Vec<FutureAbsentee>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attendance(mut self, rows: Vec<AttendanceRecord>) -> Self {
        self.attendance = rows;
        self
    }

    pub fn with_issuance(mut self, rows: Vec<IngredientIssuance>) -> Self {
        self.issuance = rows;
        self
    }

    pub fn with_future_absentees(mut self, rows: Vec<FutureAbsentee>) -> Self {
        self.future = rows;
        self
    }

    pub fn push_attendance(&mut self, row: AttendanceRecord) {
        self.attendance.push(row);
    }

    pub fn push_issuance(&mut self, row: IngredientIssuance) {
        self.issuance.push(row);
    }

    pub fn push_future_absentee(&mut self, row: FutureAbsentee) {
        self.future.push(row);
    }
}

impl RecordStore for MemoryStore {
    fn attendance(&self) -> Result<Vec<AttendanceRecord>> {
        Ok(self.attendance.clone())
    }

    fn ingredients_issued(&self) -> Result<Vec<IngredientIssuance>> {
        Ok(self.issuance.clone())
    }

    fn future_absentees(&self) -> Result<Vec<FutureAbsentee>> {
        Ok(self.future.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn attendance(d: u32, hostel: &str) -> AttendanceRecord {
        AttendanceRecord {
            date: date(d),
            hostel: hostel.to_string(),
            total_students: 120,
            students_present: 100,
            students_absent: 20,
        }
    }

    #[test]
    fn test_default_lookups_filter_by_key() {
        let store = MemoryStore::new().with_attendance(vec![
            attendance(1, "H1"),
            attendance(1, "H2"),
            attendance(2, "H1"),
        ]);

        assert_eq!(store.attendance_on(date(1)).unwrap().len(), 2);
        let found = store.attendance_for(date(2), "H1").unwrap();
        assert_eq!(found.unwrap().date, date(2));
        assert!(store.attendance_for(date(2), "H2").unwrap().is_none());
    }
}
