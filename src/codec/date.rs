//! Calendar dates stored as `YYYYMMDD`

use crate::state::FormState;
use chrono::NaiveDate;

const WIRE_FORMAT: &str = "%Y%m%d";

/// Encode a date as eight zero-padded digits
pub fn encode(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// Decode a stored value; anything but eight digits is rejected
pub fn decode(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, WIRE_FORMAT).ok()
}

pub fn commit(state: &mut FormState, name: &str, date: NaiveDate) {
    state.set(name, encode(date));
}

/// Date currently stored for a field
pub fn current(state: &FormState, name: &str) -> Option<NaiveDate> {
    state.get(name).and_then(|v| v.as_scalar()).and_then(decode)
}
