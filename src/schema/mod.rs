//! Field descriptor model
//!
//! A [`FormSchema`] is built once per form session from the descriptors and
//! option sets the member service returns. Inactive descriptors are dropped
//! on receipt but their names are remembered so that neither prefill nor
//! the serializer can resurrect them.

mod descriptor;

pub use descriptor::{
    ExtendedOptionSet, FieldDescriptor, FieldType, PASSWORD_FIELD, QUESTION_FIELD,
};

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Which flow the form belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Sign-up: no prefill, password is an ordinary field
    Create,
    /// Profile edit: prefilled, password never rendered or sent
    #[default]
    Edit,
}

/// How a field's extended index is matched to an option set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionLookup {
    /// Find the set whose owner index equals the field's extended index
    #[default]
    ByOwner,
    /// Use the extended index as a position in the received list
    ByPosition,
}

/// Option sets arrive either as a JSON list or as an object keyed by owner
///
/// Entries stay raw until [`OptionSetList::into_slots`] so that one malformed
/// set cannot fail the whole page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionSetList {
    List(Vec<Value>),
    Keyed(BTreeMap<String, Value>),
}

impl Default for OptionSetList {
    fn default() -> Self {
        OptionSetList::List(Vec::new())
    }
}

impl OptionSetList {
    /// Parse entries in server order (keyed maps are ordered by numeric key).
    /// A malformed entry leaves an empty slot so positions still line up.
    pub fn into_slots(self) -> Vec<Option<ExtendedOptionSet>> {
        match self {
            OptionSetList::List(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(position, entry)| parse_entry(&position.to_string(), entry))
                .collect(),
            OptionSetList::Keyed(map) => {
                let mut entries: Vec<(i64, Option<ExtendedOptionSet>)> = map
                    .into_iter()
                    .map(|(key, entry)| {
                        let set = parse_entry(&key, entry);
                        let order = key
                            .trim()
                            .parse()
                            .ok()
                            .or_else(|| set.as_ref().map(|s| s.owner_index))
                            .unwrap_or(i64::MAX);
                        (order, set)
                    })
                    .collect();
                entries.sort_by_key(|(order, _)| *order);
                entries.into_iter().map(|(_, set)| set).collect()
            }
        }
    }
}

fn parse_entry(key: &str, entry: Value) -> Option<ExtendedOptionSet> {
    match serde_json::from_value(entry) {
        Ok(set) => Some(set),
        Err(err) => {
            tracing::warn!(entry = %key, error = %err, "Skipping malformed option set");
            None
        }
    }
}

/// Validated schema for one form session
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
    /// `None` marks an entry that arrived malformed
    option_sets: Vec<Option<ExtendedOptionSet>>,
    excluded: BTreeSet<String>,
    mode: FormMode,
    lookup: OptionLookup,
}

impl FormSchema {
    /// Validate descriptors and keep the active ones in server order
    pub fn new(
        descriptors: Vec<FieldDescriptor>,
        option_sets: Vec<ExtendedOptionSet>,
        mode: FormMode,
        lookup: OptionLookup,
    ) -> Result<Self, SchemaError> {
        let slots = option_sets.into_iter().map(Some).collect();
        Self::with_option_slots(descriptors, slots, mode, lookup)
    }

    /// Like [`FormSchema::new`], keeping empty slots for unparsable option sets
    pub fn with_option_slots(
        descriptors: Vec<FieldDescriptor>,
        option_sets: Vec<Option<ExtendedOptionSet>>,
        mode: FormMode,
        lookup: OptionLookup,
    ) -> Result<Self, SchemaError> {
        let mut fields = Vec::new();
        let mut excluded = BTreeSet::new();
        let mut seen = BTreeSet::new();

        for field in descriptors {
            let hidden = mode == FormMode::Edit && field.name == PASSWORD_FIELD;
            if !field.is_use || hidden {
                tracing::debug!(field = %field.name, "Excluding field from form");
                excluded.insert(field.name);
                continue;
            }
            if !seen.insert(field.name.clone()) {
                return Err(SchemaError::DuplicateField(field.name));
            }
            fields.push(field);
        }

        // A name may be inactive once and active elsewhere; the active one wins
        excluded.retain(|name| !seen.contains(name));

        Ok(Self {
            fields,
            option_sets,
            excluded,
            mode,
            lookup,
        })
    }

    /// Active descriptors in render order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Usable option sets in server order
    pub fn option_sets(&self) -> impl Iterator<Item = &ExtendedOptionSet> {
        self.option_sets.iter().flatten()
    }

    /// Whether a state key must never be stored or sent
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name) || (self.mode == FormMode::Edit && name == PASSWORD_FIELD)
    }

    /// Whether a key holds an image handle
    pub fn is_image(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.image_type)
    }

    /// Resolve the option set backing a choice field
    pub fn options_for(&self, field: &FieldDescriptor) -> Result<&ExtendedOptionSet, SchemaError> {
        let index = field
            .extended_index
            .ok_or_else(|| SchemaError::MissingExtendedIndex(field.name.clone()))?;

        let found = match self.lookup {
            OptionLookup::ByOwner => self.option_sets().find(|s| s.owner_index == index),
            OptionLookup::ByPosition => usize::try_from(index)
                .ok()
                .and_then(|position| self.option_sets.get(position))
                .and_then(Option::as_ref),
        };

        found.ok_or_else(|| SchemaError::OptionSetNotFound {
            field: field.name.clone(),
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> Vec<ExtendedOptionSet> {
        vec![
            ExtendedOptionSet::new(10, &["a", "b"]),
            ExtendedOptionSet::new(3, &["x", "y", "z"]),
        ]
    }

    #[test]
    fn test_inactive_fields_are_dropped_and_remembered() {
        let schema = FormSchema::new(
            vec![
                FieldDescriptor::text("user_name", "Name"),
                FieldDescriptor::text("birthday", "Birthday").unused(),
            ],
            vec![],
            FormMode::Create,
            OptionLookup::ByOwner,
        )
        .unwrap();

        assert_eq!(schema.fields().len(), 1);
        assert!(schema.field("birthday").is_none());
        assert!(schema.is_excluded("birthday"));
        assert!(!schema.is_excluded("user_name"));
    }

    #[test]
    fn test_duplicate_active_name_is_rejected() {
        let result = FormSchema::new(
            vec![
                FieldDescriptor::text("email_address", "Email"),
                FieldDescriptor::text("email_address", "Email again"),
            ],
            vec![],
            FormMode::Create,
            OptionLookup::ByOwner,
        );
        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateField("email_address".to_string())
        );
    }

    #[test]
    fn test_duplicate_with_inactive_twin_is_allowed() {
        let schema = FormSchema::new(
            vec![
                FieldDescriptor::text("homepage", "Old").unused(),
                FieldDescriptor::text("homepage", "Homepage"),
            ],
            vec![],
            FormMode::Create,
            OptionLookup::ByOwner,
        )
        .unwrap();
        assert!(schema.field("homepage").is_some());
        assert!(!schema.is_excluded("homepage"));
    }

    #[test]
    fn test_password_hidden_in_edit_mode() {
        let fields = vec![
            FieldDescriptor::text("user_id", "ID"),
            FieldDescriptor::text(PASSWORD_FIELD, "Password"),
        ];
        let edit = FormSchema::new(fields.clone(), vec![], FormMode::Edit, OptionLookup::ByOwner)
            .unwrap();
        assert!(edit.field(PASSWORD_FIELD).is_none());
        assert!(edit.is_excluded(PASSWORD_FIELD));

        let create =
            FormSchema::new(fields, vec![], FormMode::Create, OptionLookup::ByOwner).unwrap();
        assert!(create.field(PASSWORD_FIELD).is_some());
        assert!(!create.is_excluded(PASSWORD_FIELD));
    }

    #[test]
    fn test_lookup_by_owner() {
        let field = FieldDescriptor::text("color", "Color")
            .with_type(FieldType::Radio)
            .with_options(3);
        let schema =
            FormSchema::new(vec![field.clone()], sets(), FormMode::Create, OptionLookup::ByOwner)
                .unwrap();
        let set = schema.options_for(&field).unwrap();
        assert_eq!(set.options, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_lookup_by_owner_no_match() {
        let field = FieldDescriptor::text("color", "Color")
            .with_type(FieldType::Radio)
            .with_options(1);
        let schema =
            FormSchema::new(vec![field.clone()], sets(), FormMode::Create, OptionLookup::ByOwner)
                .unwrap();
        assert_eq!(
            schema.options_for(&field).unwrap_err(),
            SchemaError::OptionSetNotFound {
                field: "color".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_lookup_by_position() {
        let field = FieldDescriptor::text("color", "Color")
            .with_type(FieldType::Radio)
            .with_options(1);
        let schema = FormSchema::new(
            vec![field.clone()],
            sets(),
            FormMode::Create,
            OptionLookup::ByPosition,
        )
        .unwrap();
        assert_eq!(schema.options_for(&field).unwrap().owner_index, 3);
    }

    #[test]
    fn test_lookup_by_position_out_of_range_is_not_found() {
        let field = FieldDescriptor::text("color", "Color")
            .with_type(FieldType::Radio)
            .with_options(-1);
        let schema = FormSchema::new(
            vec![field.clone()],
            sets(),
            FormMode::Create,
            OptionLookup::ByPosition,
        )
        .unwrap();
        assert!(matches!(
            schema.options_for(&field),
            Err(SchemaError::OptionSetNotFound { .. })
        ));
    }

    #[test]
    fn test_lookup_without_index() {
        let field = FieldDescriptor::text("color", "Color").with_type(FieldType::Radio);
        let schema =
            FormSchema::new(vec![field.clone()], sets(), FormMode::Create, OptionLookup::ByOwner)
                .unwrap();
        assert_eq!(
            schema.options_for(&field).unwrap_err(),
            SchemaError::MissingExtendedIndex("color".to_string())
        );
    }

    #[test]
    fn test_option_set_list_accepts_keyed_object() {
        let json = r#"{
            "12": {"member_join_form_srl": 12, "default_value": ["b"]},
            "4": {"member_join_form_srl": 4, "default_value": ["a"]}
        }"#;
        let list: OptionSetList = serde_json::from_str(json).unwrap();
        let sets: Vec<_> = list.into_slots().into_iter().flatten().collect();
        assert_eq!(sets[0].owner_index, 4);
        assert_eq!(sets[1].owner_index, 12);
    }

    #[test]
    fn test_option_set_list_accepts_array() {
        let json = r#"[{"member_join_form_srl": 2, "default_value": ["a"]}]"#;
        let list: OptionSetList = serde_json::from_str(json).unwrap();
        assert_eq!(list.into_slots().len(), 1);
    }

    #[test]
    fn test_malformed_option_set_keeps_its_slot() {
        let json = r#"[
            {"member_join_form_srl": 1, "default_value": ["a"]},
            {"member_join_form_srl": {"nested": true}},
            {"member_join_form_srl": "3", "default_value": null}
        ]"#;
        let list: OptionSetList = serde_json::from_str(json).unwrap();
        let slots = list.into_slots();
        assert_eq!(slots.len(), 3);
        assert!(slots[1].is_none());
        assert_eq!(slots[2], Some(ExtendedOptionSet::new(3, &[])));

        let broken = FieldDescriptor::text("size", "Size")
            .with_type(FieldType::Select)
            .with_options(1);
        let last = FieldDescriptor::text("mood", "Mood")
            .with_type(FieldType::Radio)
            .with_options(2);
        let schema = FormSchema::with_option_slots(
            vec![broken.clone(), last.clone()],
            slots,
            FormMode::Create,
            OptionLookup::ByPosition,
        )
        .unwrap();
        assert_eq!(
            schema.options_for(&broken).unwrap_err(),
            SchemaError::OptionSetNotFound {
                field: "size".to_string(),
                index: 1
            }
        );
        assert_eq!(schema.options_for(&last).unwrap().owner_index, 3);
        assert_eq!(schema.option_sets().count(), 2);
    }

    #[test]
    fn test_mode_and_lookup_wire_names() {
        let mode: FormMode = serde_json::from_str("\"create\"").unwrap();
        assert_eq!(mode, FormMode::Create);
        let lookup: OptionLookup = serde_json::from_str("\"by-position\"").unwrap();
        assert_eq!(lookup, OptionLookup::ByPosition);
    }
}
