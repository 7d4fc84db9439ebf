//! Field descriptors and option sets as sent by the member service

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Field name reserved for the account-recovery question
pub const QUESTION_FIELD: &str = "find_account_question";

/// Field name of the account password
pub const PASSWORD_FIELD: &str = "password";

/// Input type tag of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Text,
    Homepage,
    EmailAddress,
    Tel,
    Textarea,
    Radio,
    Checkbox,
    Select,
    KrZip,
    Date,
    /// Any tag this client does not know; rendered as plain text
    #[serde(other)]
    Other,
}

impl FieldType {
    /// Whether this type takes its options from an extended option set
    pub fn needs_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }
}

/// One form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
    #[serde(rename = "imageType", default, deserialize_with = "wire_bool")]
    pub image_type: bool,
    #[serde(default, deserialize_with = "wire_bool")]
    pub required: bool,
    #[serde(rename = "isUse", default, deserialize_with = "wire_bool")]
    pub is_use: bool,
    #[serde(rename = "member_join_form_srl", default, deserialize_with = "optional_wire_index")]
    pub extended_index: Option<i64>,
}

impl FieldDescriptor {
    /// Create an active plain text descriptor
    pub fn text(name: &str, title: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: None,
            field_type: None,
            image_type: false,
            required: false,
            is_use: true,
            extended_index: None,
        }
    }

    /// Builder-style type override
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Builder-style extended index
    pub fn with_options(mut self, extended_index: i64) -> Self {
        self.extended_index = Some(extended_index);
        self
    }

    /// Builder-style image flag
    pub fn image(mut self) -> Self {
        self.image_type = true;
        self
    }

    /// Builder-style `isUse = false`
    pub fn unused(mut self) -> Self {
        self.is_use = false;
        self
    }

    /// The effective type; absent means plain text
    pub fn kind(&self) -> FieldType {
        self.field_type.unwrap_or_default()
    }
}

/// Fixed vocabulary for one choice field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedOptionSet {
    #[serde(rename = "member_join_form_srl", deserialize_with = "wire_index")]
    pub owner_index: i64,
    #[serde(rename = "default_value", default, deserialize_with = "nullable_options")]
    pub options: Vec<String>,
}

impl ExtendedOptionSet {
    pub fn new(owner_index: i64, options: &[&str]) -> Self {
        Self {
            owner_index,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}

/// The service sends flags as JSON booleans, "Y"/"N" strings, 0/1 or null
fn wire_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        Some(Flag::Str(s)) => matches!(s.as_str(), "Y" | "y" | "true" | "1"),
        None => false,
    })
}

/// Indices arrive as numbers or numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum WireIndex {
    Int(i64),
    Str(String),
}

fn wire_index<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match WireIndex::deserialize(deserializer)? {
        WireIndex::Int(n) => Ok(n),
        WireIndex::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid index '{s}'"))),
    }
}

/// Like `wire_index`, but blank or non-numeric means no index
fn optional_wire_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<WireIndex>::deserialize(deserializer)? {
        Some(WireIndex::Int(n)) => Some(n),
        Some(WireIndex::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn nullable_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_type_is_plain_text() {
        let json = r#"{"name": "nick_name", "title": "Nickname", "isUse": true}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, None);
        assert_eq!(field.kind(), FieldType::Text);
        assert!(field.is_use);
        assert!(!field.image_type);
    }

    #[test]
    fn test_wire_names() {
        let json = r#"{
            "name": "hobby",
            "title": "Hobby",
            "type": "checkbox",
            "imageType": false,
            "required": "Y",
            "isUse": 1,
            "member_join_form_srl": 7
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.kind(), FieldType::Checkbox);
        assert!(field.required);
        assert!(field.is_use);
        assert_eq!(field.extended_index, Some(7));
    }

    #[test]
    fn test_null_flag_is_false() {
        let json = r#"{"name": "x", "imageType": null, "isUse": "N"}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert!(!field.image_type);
        assert!(!field.is_use);
    }

    #[test]
    fn test_string_indices_and_null_options() {
        let json = r#"{"member_join_form_srl": " 12", "default_value": null}"#;
        let set: ExtendedOptionSet = serde_json::from_str(json).unwrap();
        assert_eq!(set, ExtendedOptionSet::new(12, &[]));

        let json = r#"{"member_join_form_srl": "abc", "default_value": ["a"]}"#;
        assert!(serde_json::from_str::<ExtendedOptionSet>(json).is_err());

        let json = r#"{"name": "hobby", "isUse": true, "member_join_form_srl": "7"}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.extended_index, Some(7));

        let json = r#"{"name": "hobby", "isUse": true, "member_join_form_srl": ""}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.extended_index, None);
    }

    #[test]
    fn test_unknown_type_tag_is_other() {
        let json = r#"{"name": "x", "type": "color", "isUse": true}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.kind(), FieldType::Other);
    }

    #[test]
    fn test_all_type_tags() {
        let tags = [
            ("text", FieldType::Text),
            ("homepage", FieldType::Homepage),
            ("email_address", FieldType::EmailAddress),
            ("tel", FieldType::Tel),
            ("textarea", FieldType::Textarea),
            ("radio", FieldType::Radio),
            ("checkbox", FieldType::Checkbox),
            ("select", FieldType::Select),
            ("kr_zip", FieldType::KrZip),
            ("date", FieldType::Date),
        ];
        for (tag, expected) in tags {
            let parsed: FieldType = serde_json::from_str(&format!("\"{tag}\"")).unwrap();
            assert_eq!(parsed, expected, "tag {tag}");
        }
    }

    #[test]
    fn test_option_set_wire_names() {
        let json = r#"{"member_join_form_srl": 3, "default_value": ["red", "blue"]}"#;
        let set: ExtendedOptionSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.owner_index, 3);
        assert!(set.contains("blue"));
        assert!(!set.contains("green"));
    }

    #[test]
    fn test_needs_options() {
        assert!(FieldType::Radio.needs_options());
        assert!(FieldType::Checkbox.needs_options());
        assert!(FieldType::Select.needs_options());
        assert!(!FieldType::Tel.needs_options());
    }
}
