//! Descriptor to widget variant resolution

use crate::error::SchemaError;
use crate::schema::{ExtendedOptionSet, FieldDescriptor, FieldType, FormSchema, QUESTION_FIELD};

/// Widget/codec kind governing one field
///
/// Choice variants borrow their option set from the schema, so a resolved
/// variant cannot outlive the schema version it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant<'a> {
    Image,
    Question,
    Phone,
    Address,
    Date,
    ChoiceOne(&'a ExtendedOptionSet),
    ChoiceMany(&'a ExtendedOptionSet),
    ChoiceDropdown(&'a ExtendedOptionSet),
    Multiline,
    PlainText,
    /// Choice field whose option set could not be found
    Unresolved(SchemaError),
}

impl Variant<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Image => "image",
            Variant::Question => "question",
            Variant::Phone => "phone",
            Variant::Address => "address",
            Variant::Date => "date",
            Variant::ChoiceOne(_) => "choice",
            Variant::ChoiceMany(_) => "multi-choice",
            Variant::ChoiceDropdown(_) => "dropdown",
            Variant::Multiline => "multi-line text",
            Variant::PlainText => "text",
            Variant::Unresolved(_) => "unresolved",
        }
    }

    /// Options for choice variants
    pub fn options(&self) -> Option<&ExtendedOptionSet> {
        match self {
            Variant::ChoiceOne(set) | Variant::ChoiceMany(set) | Variant::ChoiceDropdown(set) => {
                Some(set)
            }
            _ => None,
        }
    }
}

/// Pick the variant for a descriptor
///
/// Precedence: image flag, reserved question name, then the type tag.
pub fn resolve<'a>(field: &FieldDescriptor, schema: &'a FormSchema) -> Variant<'a> {
    if field.image_type {
        return Variant::Image;
    }
    if field.name == QUESTION_FIELD {
        return Variant::Question;
    }

    match field.kind() {
        FieldType::Tel => Variant::Phone,
        FieldType::KrZip => Variant::Address,
        FieldType::Date => Variant::Date,
        FieldType::Radio => with_options(field, schema, Variant::ChoiceOne),
        FieldType::Checkbox => with_options(field, schema, Variant::ChoiceMany),
        FieldType::Select => with_options(field, schema, Variant::ChoiceDropdown),
        FieldType::Textarea => Variant::Multiline,
        FieldType::Text | FieldType::Homepage | FieldType::EmailAddress | FieldType::Other => {
            Variant::PlainText
        }
    }
}

fn with_options<'a>(
    field: &FieldDescriptor,
    schema: &'a FormSchema,
    make: fn(&'a ExtendedOptionSet) -> Variant<'a>,
) -> Variant<'a> {
    match schema.options_for(field) {
        Ok(set) => make(set),
        Err(err) => {
            tracing::warn!(field = %field.name, error = %err, "Option set not resolved");
            Variant::Unresolved(err)
        }
    }
}
