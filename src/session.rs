//! One form session: a schema version and the state edited against it

use crate::codec::{self, preference::Preference, AddressLookup};
use crate::error::{CodecError, FormError, FormResult};
use crate::picker::{AddressPicker, DatePicker, ImagePicker, PickerOutcome};
use crate::resolver::{resolve, Variant};
use crate::schema::FormSchema;
use crate::service::{FetchedSchema, FormService};
use crate::state::{FieldValue, FormState};
use crate::submission::{self, ImageSource, Payload};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A completed UI interaction on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Text(String),
    PhoneSegment { index: usize, text: String },
    AddressLookup(AddressLookup),
    AddressDetail(String),
    Select(String),
    Toggle(String),
    Date(NaiveDate),
    Image(Option<String>),
    Question(String),
    QuestionAnswer(String),
}

impl FieldEdit {
    pub fn name(&self) -> &'static str {
        match self {
            FieldEdit::Text(_) => "text",
            FieldEdit::PhoneSegment { .. } => "phone segment",
            FieldEdit::AddressLookup(_) => "address lookup",
            FieldEdit::AddressDetail(_) => "address detail",
            FieldEdit::Select(_) => "select",
            FieldEdit::Toggle(_) => "toggle",
            FieldEdit::Date(_) => "date",
            FieldEdit::Image(_) => "image",
            FieldEdit::Question(_) => "question",
            FieldEdit::QuestionAnswer(_) => "question answer",
        }
    }
}

/// Schema plus committed state for the lifetime of one form
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    state: FormState,
}

impl FormSession {
    pub fn new(schema: FormSchema, prefill: BTreeMap<String, FieldValue>) -> Self {
        let state = FormState::prefilled(&schema, prefill);
        Self { schema, state }
    }

    /// Build a session from a fetched schema
    pub fn from_fetched(fetched: FetchedSchema) -> Self {
        Self::new(fetched.schema, fetched.prefill)
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Variant of an active field
    pub fn variant(&self, name: &str) -> Result<Variant<'_>, CodecError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| CodecError::UnknownField(name.to_string()))?;
        Ok(resolve(field, &self.schema))
    }

    /// Route an edit through the field's codec
    pub fn apply(&mut self, name: &str, edit: FieldEdit) -> Result<(), CodecError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| CodecError::UnknownField(name.to_string()))?;
        let variant = resolve(field, &self.schema);
        let state = &mut self.state;

        let result = match (&variant, edit) {
            (Variant::PlainText | Variant::Multiline, FieldEdit::Text(text)) => {
                codec::text::commit(state, name, &text);
                Ok(())
            }
            (Variant::Phone, FieldEdit::PhoneSegment { index, text }) => {
                codec::phone::set_segment(state, name, index, &text)
            }
            (Variant::Address, FieldEdit::AddressLookup(lookup)) => {
                codec::address::apply_lookup(state, name, &lookup);
                Ok(())
            }
            (Variant::Address, FieldEdit::AddressDetail(text)) => {
                codec::address::set_detail(state, name, &text);
                Ok(())
            }
            (Variant::ChoiceOne(set) | Variant::ChoiceDropdown(set), FieldEdit::Select(value)) => {
                codec::choice::select_one(state, name, set.options.as_slice(), &value)
            }
            (Variant::ChoiceMany(set), FieldEdit::Toggle(value)) => {
                codec::choice::toggle(state, name, set.options.as_slice(), &value)
            }
            (Variant::Date, FieldEdit::Date(date)) => {
                codec::date::commit(state, name, date);
                Ok(())
            }
            (Variant::Image, FieldEdit::Image(handle)) => {
                codec::image::commit(state, name, handle.as_deref())
            }
            (Variant::Question, FieldEdit::Question(id)) => {
                codec::question::select(state, name, &id)
            }
            (Variant::Question, FieldEdit::QuestionAnswer(text)) => {
                codec::question::set_answer(state, &text);
                Ok(())
            }
            (Variant::Unresolved(err), _) => Err(CodecError::Schema(err.clone())),
            (variant, edit) => Err(CodecError::EditMismatch {
                field: name.to_string(),
                variant: variant.name(),
                edit: edit.name(),
            }),
        };

        match &result {
            Ok(()) => tracing::debug!(field = %name, variant = variant.name(), "Field committed"),
            Err(err) => tracing::warn!(field = %name, error = %err, "Edit rejected"),
        }
        result
    }

    /// Commit one of the fixed preference selectors
    pub fn select_preference(
        &mut self,
        preference: &Preference,
        value: &str,
    ) -> Result<(), CodecError> {
        preference.select(&mut self.state, value)
    }

    /// Run the address picker; returns whether a value was committed
    pub async fn pick_address(
        &mut self,
        name: &str,
        picker: &dyn AddressPicker,
    ) -> Result<bool, CodecError> {
        self.expect_variant(name, "address", "address lookup")?;
        match picker.lookup().await {
            PickerOutcome::Picked(lookup) => {
                self.apply(name, FieldEdit::AddressLookup(lookup))?;
                Ok(true)
            }
            PickerOutcome::Cancelled => Ok(false),
        }
    }

    /// Run the date picker starting from the stored date
    pub async fn pick_date(
        &mut self,
        name: &str,
        picker: &dyn DatePicker,
    ) -> Result<bool, CodecError> {
        self.expect_variant(name, "date", "date")?;
        let initial = codec::date::current(&self.state, name);
        match picker.pick_date(initial).await {
            PickerOutcome::Picked(date) => {
                self.apply(name, FieldEdit::Date(date))?;
                Ok(true)
            }
            PickerOutcome::Cancelled => Ok(false),
        }
    }

    /// Run the image picker; a result without a handle is an error
    pub async fn pick_image(
        &mut self,
        name: &str,
        picker: &dyn ImagePicker,
    ) -> Result<bool, CodecError> {
        self.expect_variant(name, "image", "image")?;
        match picker.pick_image().await {
            PickerOutcome::Picked(handle) => {
                self.apply(name, FieldEdit::Image(handle))?;
                Ok(true)
            }
            PickerOutcome::Cancelled => Ok(false),
        }
    }

    /// Serialize the current state
    pub fn payload(&self, images: &dyn ImageSource) -> Result<Payload, FormError> {
        Ok(submission::serialize(&self.state, &self.schema, images)?)
    }

    /// Serialize and send in one attempt; nothing is sent if serialization fails
    pub async fn submit(
        &self,
        service: &dyn FormService,
        images: &dyn ImageSource,
    ) -> FormResult<()> {
        let payload = self.payload(images)?;
        tracing::info!(parts = payload.parts().len(), "Submitting form");
        service.submit(payload).await?;
        Ok(())
    }

    fn expect_variant(
        &self,
        name: &str,
        want: &'static str,
        edit: &'static str,
    ) -> Result<(), CodecError> {
        let variant = self.variant(name)?;
        if let Variant::Unresolved(err) = variant {
            return Err(CodecError::Schema(err));
        }
        if variant.name() != want {
            return Err(CodecError::EditMismatch {
                field: name.to_string(),
                variant: variant.name(),
                edit,
            });
        }
        Ok(())
    }
}
