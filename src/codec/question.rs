//! Account-recovery question and answer
//!
//! The question id goes under the field's own key, the answer under a
//! fixed side-channel key.

use super::choice;
use crate::error::CodecError;
use crate::state::FormState;

/// State key holding the answer text
pub const ANSWER_KEY: &str = "find_account_answer";

/// (id, label) pairs accepted by the service
pub const QUESTIONS: [(&str, &str); 9] = [
    ("1", "What is your other email address?"),
    ("2", "What is your most treasured possession?"),
    ("3", "Which elementary school did you attend?"),
    ("4", "Where is your hometown?"),
    ("5", "Describe your ideal partner."),
    ("6", "What is your mother's name?"),
    ("7", "What is your father's name?"),
    ("8", "What is your favorite color?"),
    ("9", "What is your favorite food?"),
];

pub fn question_ids() -> Vec<&'static str> {
    QUESTIONS.iter().map(|(id, _)| *id).collect()
}

pub fn label(id: &str) -> Option<&'static str> {
    QUESTIONS
        .iter()
        .find(|(qid, _)| *qid == id)
        .map(|(_, label)| *label)
}

pub fn select(state: &mut FormState, name: &str, id: &str) -> Result<(), CodecError> {
    choice::select_one(state, name, &question_ids(), id)
}

pub fn set_answer(state: &mut FormState, text: &str) {
    state.set(ANSWER_KEY, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::QUESTION_FIELD;
    use crate::state::FieldValue;

    #[test]
    fn test_select_and_answer_write_two_keys() {
        let mut state = FormState::new();
        select(&mut state, QUESTION_FIELD, "4").unwrap();
        set_answer(&mut state, "Busan");
        assert_eq!(state.get(QUESTION_FIELD), Some(&FieldValue::from("4")));
        assert_eq!(state.get(ANSWER_KEY), Some(&FieldValue::from("Busan")));
    }

    #[test]
    fn test_unknown_question_is_rejected() {
        let mut state = FormState::new();
        assert!(select(&mut state, QUESTION_FIELD, "10").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(question_ids().len(), 9);
        assert!(label("8").is_some());
        assert!(label("0").is_none());
    }
}
