//! Postal addresses stored as five fixed slots
//!
//! ```text
//! [0] postal code
//! [1] primary address (scheme the user picked)
//! [2] "(alternate address)" or ""
//! [3] detail text typed by the user
//! [4] "(neighborhood, building)" or ""
//! ```

use crate::state::{FieldValue, FormState};
use serde::{Deserialize, Serialize};

pub const SLOTS: usize = 5;
pub const DETAIL_SLOT: usize = 3;

/// Addressing scheme chosen in the lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AddressScheme {
    /// Road-name address
    #[default]
    #[serde(rename = "R")]
    Road,
    /// Lot-number address
    #[serde(rename = "J")]
    Lot,
}

impl AddressScheme {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Road => Self::Lot,
            Self::Lot => Self::Road,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Road => "Road",
            Self::Lot => "Lot number",
        }
    }
}

/// Result of an address lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressLookup {
    pub scheme: AddressScheme,
    pub road_address: String,
    pub lot_address: String,
    pub neighborhood: String,
    pub building_name: String,
    pub postal_code: String,
}

/// Decoded address value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub postal_code: String,
    pub primary: String,
    pub alternate: String,
    pub detail: String,
    pub supplementary: String,
}

impl Address {
    /// Build the looked-up slots; detail is left empty
    pub fn from_lookup(lookup: &AddressLookup) -> Self {
        let (primary, alternate) = match lookup.scheme {
            AddressScheme::Road => (&lookup.road_address, &lookup.lot_address),
            AddressScheme::Lot => (&lookup.lot_address, &lookup.road_address),
        };

        let extra = [&lookup.neighborhood, &lookup.building_name]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            postal_code: lookup.postal_code.clone(),
            primary: primary.clone(),
            alternate: parenthesize(alternate),
            detail: String::new(),
            supplementary: parenthesize(&extra),
        }
    }

    pub fn decode(value: Option<&FieldValue>) -> Self {
        let slots = value.map(|v| v.to_slots(SLOTS)).unwrap_or_else(|| vec![String::new(); SLOTS]);
        let mut slots = slots.into_iter();
        let mut next = || slots.next().unwrap_or_default();
        Self {
            postal_code: next(),
            primary: next(),
            alternate: next(),
            detail: next(),
            supplementary: next(),
        }
    }

    pub fn encode(&self) -> FieldValue {
        FieldValue::Sequence(vec![
            self.postal_code.clone(),
            self.primary.clone(),
            self.alternate.clone(),
            self.detail.clone(),
            self.supplementary.clone(),
        ])
    }
}

fn parenthesize(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("({text})")
    }
}

/// Store a lookup result, keeping any detail text already entered
pub fn apply_lookup(state: &mut FormState, name: &str, lookup: &AddressLookup) {
    let detail = Address::decode(state.get(name)).detail;
    let address = Address {
        detail,
        ..Address::from_lookup(lookup)
    };
    tracing::debug!(field = %name, postal_code = %address.postal_code, "Address looked up");
    state.set(name, address.encode());
}

/// Replace only the detail slot
pub fn set_detail(state: &mut FormState, name: &str, text: &str) {
    let mut address = Address::decode(state.get(name));
    address.detail = text.to_string();
    state.set(name, address.encode());
}
