//! Three-part phone numbers (prefix, exchange, line)

use crate::error::CodecError;
use crate::state::{FieldValue, FormState};

pub const SEGMENTS: usize = 3;

/// Decoded phone value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumber {
    pub segments: [String; SEGMENTS],
}

impl PhoneNumber {
    /// Decode from a stored value; absent or short values pad with ""
    pub fn decode(value: Option<&FieldValue>) -> Self {
        let mut phone = Self::default();
        if let Some(value) = value {
            for (i, slot) in phone.segments.iter_mut().enumerate() {
                *slot = value.slot(i).to_string();
            }
        }
        phone
    }

    pub fn encode(&self) -> FieldValue {
        FieldValue::Sequence(self.segments.to_vec())
    }

    pub fn segment(&self, index: usize) -> &str {
        self.segments.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Replace one segment and write all three back
pub fn set_segment(
    state: &mut FormState,
    name: &str,
    index: usize,
    text: &str,
) -> Result<(), CodecError> {
    if index >= SEGMENTS {
        return Err(CodecError::SegmentOutOfRange(index));
    }
    let mut phone = PhoneNumber::decode(state.get(name));
    phone.segments[index] = text.to_string();
    state.set(name, phone.encode());
    Ok(())
}
