//! Error taxonomy for the provisioning pipeline
//!
//! Build/train failures are fatal for the invoking run; per-query prediction
//! failures (unknown hostel, missing attendance row) fail only that query.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by dataset building, training, and prediction
#[derive(Debug, Error)]
pub enum Error {
    /// Record store unreachable, or a required table/file is missing
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A category value was not present in the training vocabulary
    #[error("unknown {kind} '{value}': not seen during training")]
    UnknownCategory {
        /// Which vocabulary rejected the value ("hostel" or "ingredient")
        kind: &'static str,
        /// The rejected category string
        value: String,
    },

    /// No attendance row exists for the queried (date, hostel) key
    #[error("no attendance record for hostel '{hostel}' on {date}")]
    AttendanceNotFound { date: NaiveDate, hostel: String },

    /// Model/encoder artifact set is missing or partially written
    #[error("artifact set inconsistent: {0}")]
    ArtifactInconsistent(String),

    /// Every joined row was degenerate; nothing left to train on
    #[error("training set is empty after excluding rows with zero or missing students present")]
    EmptyDataset,

    /// Configuration file missing, unreadable, or invalid
    #[error("config error: {0}")]
    Config(String),

    /// Artifact or record (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for all fallible pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_key() {
        let err = Error::UnknownCategory {
            kind: "hostel",
            value: "H7".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("hostel"));
        assert!(msg.contains("H7"));

        let err = Error::AttendanceNotFound {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            hostel: "H1".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("H1"));
        assert!(msg.contains("2024-01-01"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
