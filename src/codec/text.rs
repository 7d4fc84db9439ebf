//! Plain and multi-line text

use crate::state::FormState;

/// Commit a text value; last edit wins, empty is a real value
pub fn commit(state: &mut FormState, name: &str, text: &str) {
    state.set(name, text);
}

/// Current text of a field, "" when absent
pub fn current<'a>(state: &'a FormState, name: &str) -> &'a str {
    state.get(name).map(|v| v.slot(0)).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;

    #[test]
    fn test_last_edit_wins() {
        let mut state = FormState::new();
        commit(&mut state, "nick_name", "first");
        commit(&mut state, "nick_name", "second");
        assert_eq!(current(&state, "nick_name"), "second");
    }

    #[test]
    fn test_empty_commit_is_kept() {
        let mut state = FormState::new();
        commit(&mut state, "nick_name", "");
        assert_eq!(state.get("nick_name"), Some(&FieldValue::from("")));
    }
}
