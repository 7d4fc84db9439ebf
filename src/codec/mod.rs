//! Value codecs
//!
//! Each widget variant owns one codec. A codec is the only code allowed to
//! write a field's slot in [`crate::state::FormState`], and every write
//! replaces the slot as a whole.

pub mod address;
pub mod choice;
pub mod date;
pub mod image;
pub mod phone;
pub mod preference;
pub mod question;
pub mod text;

pub use address::{Address, AddressLookup, AddressScheme};
pub use phone::PhoneNumber;
pub use preference::Preference;
