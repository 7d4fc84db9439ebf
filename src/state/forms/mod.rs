//! Form domain layer
//!
//! Committed field values and the state store they live in. Only codecs
//! write here; transient UI state lives in [`crate::state::AppState`].

mod field;
mod form_state;

pub use field::FieldValue;
pub use form_state::FormState;
