//! Image fields hold one opaque resource handle

use crate::error::CodecError;
use crate::state::FormState;

/// Commit a picker result; no handle is an error and leaves state untouched
pub fn commit(state: &mut FormState, name: &str, handle: Option<&str>) -> Result<(), CodecError> {
    match handle {
        Some(handle) if !handle.trim().is_empty() => {
            state.set(name, handle);
            Ok(())
        }
        _ => Err(CodecError::NoImageHandle(name.to_string())),
    }
}
