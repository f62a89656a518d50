//! Deterministic label encoding for categorical features
//!
//! A [`CategoryEncoder`] maps the distinct category strings seen at fit time
//! to contiguous integer codes. The mapping is deterministic given the same
//! input set: values are sorted lexicographically and enumerated, so the
//! persisted encoder reproduces identical codes regardless of row order.
//!
//! Encoding a value absent from the vocabulary is rejected with
//! [`Error::UnknownCategory`], never coerced to a guess.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bijection between category strings and contiguous integer codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoder {
    /// Vocabulary label used in error messages ("hostel", "ingredient")
    kind: String,
    /// Sorted distinct values; a value's code is its index
    classes: Vec<String>,
}

impl CategoryEncoder {
    /// Fit an encoder over the distinct values in `values`
    ///
    /// `kind` names the vocabulary in `UnknownCategory` errors.
    pub fn fit<I, S>(kind: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();
        Self {
            kind: kind.to_string(),
            classes: distinct.into_iter().collect(),
        }
    }

    /// Encode a category string to its integer code
    pub fn encode(&self, value: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .map_err(|_| Error::UnknownCategory {
                kind: kind_label(&self.kind),
                value: value.to_string(),
            })
    }

    /// Decode an integer code back to its category string
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    /// Whether the value was seen at fit time
    pub fn contains(&self, value: &str) -> bool {
        self.classes.binary_search_by(|c| c.as_str().cmp(value)).is_ok()
    }

    /// The full vocabulary, in code order (lexicographic)
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct categories
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True when the encoder was fit over an empty set
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Map the persisted kind string onto a static label for error variants
fn kind_label(kind: &str) -> &'static str {
    match kind {
        "hostel" => "hostel",
        "ingredient" => "ingredient",
        _ => "category",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let enc = CategoryEncoder::fit("hostel", ["H2", "H1", "H3"]);
        for class in enc.classes() {
            let code = enc.encode(class).unwrap();
            assert_eq!(enc.decode(code), Some(class.as_str()));
        }
    }

    #[test]
    fn test_mapping_is_sorted_and_order_independent() {
        let a = CategoryEncoder::fit("ingredient", ["Rice", "Dal", "Oil"]);
        let b = CategoryEncoder::fit("ingredient", ["Oil", "Rice", "Dal", "Rice"]);
        assert_eq!(a, b);
        assert_eq!(a.classes(), &["Dal", "Oil", "Rice"]);
        assert_eq!(a.encode("Dal").unwrap(), 0);
        assert_eq!(a.encode("Rice").unwrap(), 2);
    }

    #[test]
    fn test_unseen_value_is_rejected() {
        let enc = CategoryEncoder::fit("hostel", ["H1"]);
        let err = enc.encode("H9").unwrap_err();
        match err {
            Error::UnknownCategory { kind, value } => {
                assert_eq!(kind, "hostel");
                assert_eq!(value, "H9");
            }
            other => panic!("expected UnknownCategory, got {other}"),
        }
    }

    #[test]
    fn test_decode_out_of_range() {
        let enc = CategoryEncoder::fit("hostel", ["H1"]);
        assert_eq!(enc.decode(0), Some("H1"));
        assert_eq!(enc.decode(1), None);
    }

    #[test]
    fn test_serde_round_trip_preserves_mapping() {
        let enc = CategoryEncoder::fit("ingredient", ["Rice", "Dal"]);
        let json = serde_json::to_string(&enc).unwrap();
        let back: CategoryEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, enc);
        assert_eq!(back.encode("Rice").unwrap(), enc.encode("Rice").unwrap());
    }

    #[test]
    fn test_empty_encoder() {
        let enc = CategoryEncoder::fit("hostel", Vec::<String>::new());
        assert!(enc.is_empty());
        assert_eq!(enc.len(), 0);
        assert!(enc.encode("H1").is_err());
    }
}
