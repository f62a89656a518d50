//! Abastecer: hostel mess provisioning forecasts
//!
//! Estimates per-student ingredient consumption from historical attendance
//! and issuance records, and predicts future provisioning needs per hostel.
//!
//! The pipeline has three stages, invoked once per run and connected only
//! through persisted artifacts:
//!
//! 1. **Dataset builder** ([`dataset`]) joins attendance, ingredient
//!    issuance, and future-absentee tables on (date, hostel) and derives the
//!    per-student quantity target.
//! 2. **Trainer** ([`train`]) fits deterministic category encoders and a
//!    seeded random-forest regressor, then persists the (model, hostel
//!    encoder, ingredient encoder) triple as one atomic bundle
//!    ([`artifacts`]).
//! 3. **Predictor** ([`predict`]) reloads the bundle and serves exhaustive
//!    per-ingredient forecasts for a (date, hostel, students-present) query.
//!
//! Record stores ([`store`]) are polymorphic over "read three named tables":
//! SQLite, a CSV directory, or an in-memory fake.
//!
//! # Example
//!
//! ```
//! use abastecer::dataset::build_dataset;
//! use abastecer::forest::ForestConfig;
//! use abastecer::predict::Predictor;
//! use abastecer::records::{AttendanceRecord, IngredientIssuance};
//! use abastecer::store::MemoryStore;
//! use abastecer::train::train;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let store = MemoryStore::new()
//!     .with_attendance(vec![AttendanceRecord {
//!         date,
//!         hostel: "H1".to_string(),
//!         total_students: 120,
//!         students_present: 100,
//!         students_absent: 20,
//!     }])
//!     .with_issuance(vec![IngredientIssuance {
//!         date,
//!         hostel: "H1".to_string(),
//!         caterer_id: "C01".to_string(),
//!         ingredient_name: "Rice".to_string(),
//!         ingredient_category: "Grain".to_string(),
//!         quantity_issued: 50.0,
//!         unit: "kg".to_string(),
//!     }]);
//!
//! let dataset = build_dataset(&store).unwrap();
//! let (bundle, _report) = train(&dataset, &ForestConfig::default()).unwrap();
//! let predictor = Predictor::new(bundle);
//! let table = predictor.predict("H1", 100).unwrap();
//! assert!((table["Rice"].total_qty - 50.0).abs() < 1e-6);
//! ```

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod encoding;
mod error;
pub mod forest;
pub mod predict;
pub mod records;
pub mod store;
pub mod train;

pub use error::{Error, Result};
