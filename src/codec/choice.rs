//! Single- and multi-selection over a fixed vocabulary

use crate::error::CodecError;
use crate::state::{FieldValue, FormState};

/// Commit exactly one option, replacing any prior selection
pub fn select_one<S: AsRef<str>>(
    state: &mut FormState,
    name: &str,
    options: &[S],
    value: &str,
) -> Result<(), CodecError> {
    ensure_option(name, options, value)?;
    state.set(name, value);
    Ok(())
}

/// Toggle membership of one option in a multi-selection
///
/// Present options are removed, absent ones appended.
pub fn toggle<S: AsRef<str>>(
    state: &mut FormState,
    name: &str,
    options: &[S],
    value: &str,
) -> Result<(), CodecError> {
    ensure_option(name, options, value)?;
    let mut selected = selected(state, name);
    if let Some(position) = selected.iter().position(|s| s == value) {
        selected.remove(position);
    } else {
        selected.push(value.to_string());
    }
    state.set(name, FieldValue::Sequence(selected));
    Ok(())
}

/// Current selections of a multi-choice field
pub fn selected(state: &FormState, name: &str) -> Vec<String> {
    match state.get(name) {
        Some(FieldValue::Sequence(items)) => {
            let mut unique: Vec<String> = Vec::with_capacity(items.len());
            for item in items {
                if !item.is_empty() && !unique.contains(item) {
                    unique.push(item.clone());
                }
            }
            unique
        }
        Some(FieldValue::Scalar(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Whether `value` is the current single selection
pub fn is_selected(state: &FormState, name: &str, value: &str) -> bool {
    match state.get(name) {
        Some(FieldValue::Scalar(s)) => s == value,
        Some(FieldValue::Sequence(items)) => items.iter().any(|s| s == value),
        None => false,
    }
}

fn ensure_option<S: AsRef<str>>(name: &str, options: &[S], value: &str) -> Result<(), CodecError> {
    if options.iter().any(|o| o.as_ref() == value) {
        Ok(())
    } else {
        Err(CodecError::NotAnOption {
            field: name.to_string(),
            value: value.to_string(),
        })
    }
}
