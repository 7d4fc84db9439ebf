//! Committed form values keyed by field name

use super::field::FieldValue;
use crate::schema::FormSchema;
use std::collections::BTreeMap;

/// Map from field name to committed value
///
/// Every write replaces a whole slot. Keys are kept sorted so iteration,
/// and therefore the serialized payload, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a prefill mapping, skipping keys the schema excludes
    pub fn prefilled(schema: &FormSchema, prefill: BTreeMap<String, FieldValue>) -> Self {
        let values = prefill
            .into_iter()
            .filter(|(key, _)| {
                let keep = !schema.is_excluded(key);
                if !keep {
                    tracing::debug!(field = %key, "Dropping prefill for excluded field");
                }
                keep
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Replace the whole value of a field
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, FormMode, OptionLookup, PASSWORD_FIELD};

    fn schema() -> FormSchema {
        FormSchema::new(
            vec![
                FieldDescriptor::text("nick_name", "Nickname"),
                FieldDescriptor::text("homepage", "Homepage").unused(),
                FieldDescriptor::text(PASSWORD_FIELD, "Password"),
            ],
            vec![],
            FormMode::Edit,
            OptionLookup::ByOwner,
        )
        .unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let state = FormState::new();
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let mut state = FormState::new();
        state.set("phone", vec!["010".to_string(), "1".to_string()]);
        state.set("phone", "plain");
        assert_eq!(state.get("phone"), Some(&FieldValue::from("plain")));
    }

    #[test]
    fn test_empty_string_is_distinct_from_absent() {
        let mut state = FormState::new();
        state.set("nick_name", "");
        assert!(state.contains("nick_name"));
        assert!(!state.contains("user_name"));
    }

    #[test]
    fn test_prefill_skips_excluded_keys() {
        let prefill = BTreeMap::from([
            ("nick_name".to_string(), FieldValue::from("neo")),
            ("homepage".to_string(), FieldValue::from("http://x")),
            (PASSWORD_FIELD.to_string(), FieldValue::from("secret")),
            ("allow_mailing".to_string(), FieldValue::from("Y")),
        ]);
        let state = FormState::prefilled(&schema(), prefill);
        assert!(state.contains("nick_name"));
        assert!(state.contains("allow_mailing"));
        assert!(!state.contains("homepage"));
        assert!(!state.contains(PASSWORD_FIELD));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut state = FormState::new();
        state.set("b", "2");
        state.set("a", "1");
        let keys: Vec<_> = state.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
