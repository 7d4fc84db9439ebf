//! Fixed preference selectors shown after the schema fields

use super::choice;
use crate::error::CodecError;
use crate::schema::FormMode;
use crate::state::FormState;

/// A single-choice selector with a built-in vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preference {
    pub key: &'static str,
    pub title: &'static str,
    /// (value, label)
    pub choices: &'static [(&'static str, &'static str)],
}

pub const ALLOW_MESSAGE: Preference = Preference {
    key: "allow_message",
    title: "Receive messages",
    choices: &[("Y", "From everyone"), ("F", "Friends only"), ("N", "Nobody")],
};

pub const ALLOW_MAILING: Preference = Preference {
    key: "allow_mailing",
    title: "Receive mailing",
    choices: &[("Y", "Yes"), ("N", "No")],
};

pub const ACCEPT_AGREEMENT: Preference = Preference {
    key: "accept_agreement",
    title: "Accept terms",
    choices: &[("Y", "Agree"), ("N", "Disagree")],
};

impl Preference {
    pub fn values(&self) -> Vec<&'static str> {
        self.choices.iter().map(|(value, _)| *value).collect()
    }

    pub fn select(&self, state: &mut FormState, value: &str) -> Result<(), CodecError> {
        choice::select_one(state, self.key, &self.values(), value)
    }
}

/// Selectors rendered for a flow, in order
pub fn for_mode(mode: FormMode) -> Vec<Preference> {
    match mode {
        FormMode::Create => vec![ACCEPT_AGREEMENT, ALLOW_MESSAGE, ALLOW_MAILING],
        FormMode::Edit => vec![ALLOW_MESSAGE, ALLOW_MAILING],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldValue;

    #[test]
    fn test_select_fixed_value() {
        let mut state = FormState::new();
        ALLOW_MESSAGE.select(&mut state, "F").unwrap();
        assert_eq!(state.get("allow_message"), Some(&FieldValue::from("F")));
        assert!(ALLOW_MAILING.select(&mut state, "F").is_err());
    }

    #[test]
    fn test_agreement_only_in_create_flow() {
        assert!(for_mode(FormMode::Create).contains(&ACCEPT_AGREEMENT));
        assert!(!for_mode(FormMode::Edit).contains(&ACCEPT_AGREEMENT));
    }
}
