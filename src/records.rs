//! Raw record types for the three source tables
//!
//! Field names serialize with the original column headers (`Date`, `Hostel`,
//! ...) so the same derives cover CSV files, SQLite rows, and JSON output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One attendance row per (date, hostel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Hostel")]
    pub hostel: String,
    #[serde(rename = "Total_Students")]
    pub total_students: u32,
    #[serde(rename = "Students_Present")]
    pub students_present: u32,
    #[serde(rename = "Students_Absent")]
    pub students_absent: u32,
}

/// One row per ingredient issued to a hostel on a date; many per (date, hostel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientIssuance {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Hostel")]
    pub hostel: String,
    #[serde(rename = "Caterer_ID")]
    pub caterer_id: String,
    #[serde(rename = "Ingredient_Name")]
    pub ingredient_name: String,
    #[serde(rename = "Ingredient_Category")]
    pub ingredient_category: String,
    #[serde(rename = "Quantity_Issued")]
    pub quantity_issued: f64,
    #[serde(rename = "Unit")]
    pub unit: String,
}

/// Zero or one expected-absence row per (date, hostel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureAbsentee {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Hostel")]
    pub hostel: String,
    #[serde(rename = "Expected_Absentees")]
    pub expected_absentees: u32,
    #[serde(rename = "Reason")]
    pub reason: String,
}
