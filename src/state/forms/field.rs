//! Form field value objects

use serde::{Deserialize, Serialize};

/// Committed value of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    /// Composite values: phone segments, address parts, multi-select
    Sequence(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Scalar(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Sequence(value)
    }
}

impl FieldValue {
    /// Get the scalar value (None for sequences)
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::Sequence(_) => None,
        }
    }

    /// Get the sequence value (None for scalars)
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::Sequence(items) => Some(items),
        }
    }

    /// Read slot `index`, treating scalars as a one-slot sequence
    pub fn slot(&self, index: usize) -> &str {
        match self {
            FieldValue::Scalar(s) if index == 0 => s,
            FieldValue::Scalar(_) => "",
            FieldValue::Sequence(items) => items.get(index).map(String::as_str).unwrap_or(""),
        }
    }

    /// Copy into exactly `len` slots, padding absent ones with ""
    pub fn to_slots(&self, len: usize) -> Vec<String> {
        (0..len).map(|i| self.slot(i).to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_scalar() {
        assert_eq!(FieldValue::default(), FieldValue::Scalar(String::new()));
    }

    #[test]
    fn test_slot_reads() {
        let value = FieldValue::Sequence(vec!["010".into(), "1234".into()]);
        assert_eq!(value.slot(0), "010");
        assert_eq!(value.slot(1), "1234");
        assert_eq!(value.slot(2), "");

        let scalar = FieldValue::from("x");
        assert_eq!(scalar.slot(0), "x");
        assert_eq!(scalar.slot(1), "");
    }

    #[test]
    fn test_to_slots_pads_and_truncates() {
        let value = FieldValue::Sequence(vec!["a".into()]);
        assert_eq!(value.to_slots(3), vec!["a", "", ""]);
        let long = FieldValue::Sequence(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(long.to_slots(2), vec!["a", "b"]);
    }

    #[test]
    fn test_untagged_json() {
        let scalar: FieldValue = serde_json::from_str("\"Y\"").unwrap();
        assert_eq!(scalar.as_scalar(), Some("Y"));
        let seq: FieldValue = serde_json::from_str(r#"["010","1234","5678"]"#).unwrap();
        assert_eq!(seq.as_sequence().map(|s| s.len()), Some(3));
    }
}
