//! Picker dialog state
//!
//! Each dialog is opened for one field and ends with a `PickerOutcome`.
//! Nothing here touches the form state. Apart from the list dialog they
//! serve as the session's pickers once confirmed.

use crate::codec::{AddressLookup, AddressScheme};
use crate::picker::{AddressPicker, DatePicker, ImagePicker, PickerOutcome};
use async_trait::async_trait;
use chrono::{Days, Months, NaiveDate};

/// Open picker dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Address(AddressDialog),
    Date(DateDialog),
    Image(ImageDialog),
    List(ListDialog),
}

impl Dialog {
    /// Field the dialog was opened for
    pub fn field(&self) -> &str {
        match self {
            Dialog::Address(d) => &d.field,
            Dialog::Date(d) => &d.field,
            Dialog::Image(d) => &d.field,
            Dialog::List(d) => &d.field,
        }
    }
}

/// Inputs of the address lookup form, after the scheme selector
pub const ADDRESS_INPUTS: [&str; 5] = [
    "Postal code",
    "Road address",
    "Lot address",
    "Neighborhood",
    "Building",
];

/// Manual address lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDialog {
    pub field: String,
    pub lookup: AddressLookup,
    /// 0 is the scheme selector, 1.. are `ADDRESS_INPUTS`
    pub focus: usize,
}

impl AddressDialog {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            lookup: AddressLookup::default(),
            focus: 1,
        }
    }

    pub fn next_input(&mut self) {
        self.focus = (self.focus + 1) % (ADDRESS_INPUTS.len() + 1);
    }

    pub fn prev_input(&mut self) {
        self.focus = (self.focus + ADDRESS_INPUTS.len()) % (ADDRESS_INPUTS.len() + 1);
    }

    pub fn toggle_scheme(&mut self) {
        self.lookup.scheme = self.lookup.scheme.toggle();
    }

    pub fn scheme(&self) -> AddressScheme {
        self.lookup.scheme
    }

    /// Text of input `index` (1-based, matching `focus`)
    pub fn input(&self, index: usize) -> &str {
        match index {
            1 => &self.lookup.postal_code,
            2 => &self.lookup.road_address,
            3 => &self.lookup.lot_address,
            4 => &self.lookup.neighborhood,
            5 => &self.lookup.building_name,
            _ => "",
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            1 => Some(&mut self.lookup.postal_code),
            2 => Some(&mut self.lookup.road_address),
            3 => Some(&mut self.lookup.lot_address),
            4 => Some(&mut self.lookup.neighborhood),
            5 => Some(&mut self.lookup.building_name),
            _ => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.focused_input() {
            Some(text) => text.push(c),
            None if c == ' ' => self.toggle_scheme(),
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_input() {
            text.pop();
        }
    }

    /// Finish the lookup; an empty postal code counts as cancelled
    pub fn confirm(&self) -> PickerOutcome<AddressLookup> {
        if self.lookup.postal_code.trim().is_empty() {
            PickerOutcome::Cancelled
        } else {
            PickerOutcome::Picked(self.lookup.clone())
        }
    }
}

#[async_trait]
impl AddressPicker for AddressDialog {
    async fn lookup(&self) -> PickerOutcome<AddressLookup> {
        self.confirm()
    }
}

/// Date component being adjusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePart {
    Year,
    Month,
    #[default]
    Day,
}

impl DatePart {
    pub fn next(&self) -> Self {
        match self {
            Self::Year => Self::Month,
            Self::Month => Self::Day,
            Self::Day => Self::Year,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Year => Self::Day,
            Self::Month => Self::Year,
            Self::Day => Self::Month,
        }
    }
}

/// Calendar date selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateDialog {
    pub field: String,
    pub date: NaiveDate,
    pub part: DatePart,
}

impl DateDialog {
    /// Start from the stored date, or `today` when none is stored
    pub fn new(field: &str, initial: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            field: field.to_string(),
            date: initial.unwrap_or(today),
            part: DatePart::default(),
        }
    }

    /// Step the focused part; month and year steps clamp to the month's last day
    pub fn step(&mut self, forward: bool) {
        let stepped = match (self.part, forward) {
            (DatePart::Year, true) => self.date.checked_add_months(Months::new(12)),
            (DatePart::Year, false) => self.date.checked_sub_months(Months::new(12)),
            (DatePart::Month, true) => self.date.checked_add_months(Months::new(1)),
            (DatePart::Month, false) => self.date.checked_sub_months(Months::new(1)),
            (DatePart::Day, true) => self.date.checked_add_days(Days::new(1)),
            (DatePart::Day, false) => self.date.checked_sub_days(Days::new(1)),
        };
        if let Some(date) = stepped {
            self.date = date;
        }
    }

    pub fn confirm(&self) -> PickerOutcome<NaiveDate> {
        PickerOutcome::Picked(self.date)
    }
}

// `initial` already seeded the dialog when it opened
#[async_trait]
impl DatePicker for DateDialog {
    async fn pick_date(&self, _initial: Option<NaiveDate>) -> PickerOutcome<NaiveDate> {
        self.confirm()
    }
}

/// Image path prompt standing in for the photo library
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDialog {
    pub field: String,
    pub path: String,
}

impl ImageDialog {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            path: String::new(),
        }
    }

    /// A blank path closes normally but yields no handle
    pub fn confirm(&self) -> PickerOutcome<Option<String>> {
        let path = self.path.trim();
        if path.is_empty() {
            PickerOutcome::Picked(None)
        } else {
            PickerOutcome::Picked(Some(path.to_string()))
        }
    }
}

#[async_trait]
impl ImagePicker for ImageDialog {
    async fn pick_image(&self) -> PickerOutcome<Option<String>> {
        self.confirm()
    }
}

/// What a list dialog selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Dropdown options of a choice field
    Options,
    /// Account-recovery question ids
    Question,
}

/// Pick one entry from a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDialog {
    pub field: String,
    pub kind: ListKind,
    /// (value, label)
    pub items: Vec<(String, String)>,
    pub highlighted: usize,
}

impl ListDialog {
    /// Open with the current value highlighted when it is in the list
    pub fn new(field: &str, kind: ListKind, items: Vec<(String, String)>, current: &str) -> Self {
        let highlighted = items
            .iter()
            .position(|(value, _)| value == current)
            .unwrap_or(0);
        Self {
            field: field.to_string(),
            kind,
            items,
            highlighted,
        }
    }

    pub fn move_down(&mut self) {
        if self.highlighted + 1 < self.items.len() {
            self.highlighted += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn confirm(self) -> PickerOutcome<String> {
        match self.items.into_iter().nth(self.highlighted) {
            Some((value, _)) => PickerOutcome::Picked(value),
            None => PickerOutcome::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_address_dialog_typing_and_scheme() {
        let mut dialog = AddressDialog::new("address");
        for c in "04524".chars() {
            dialog.input_char(c);
        }
        dialog.next_input();
        dialog.input_char('M');
        dialog.backspace();
        dialog.input_char('R');
        dialog.prev_input();
        dialog.prev_input();
        assert_eq!(dialog.focus, 0);
        dialog.input_char(' ');
        assert_eq!(dialog.scheme(), AddressScheme::Lot);

        let PickerOutcome::Picked(lookup) = dialog.confirm() else {
            panic!("address lookup was cancelled");
        };
        assert_eq!(lookup.postal_code, "04524");
        assert_eq!(lookup.road_address, "R");
        assert_eq!(lookup.scheme, AddressScheme::Lot);
    }

    #[test]
    fn test_address_dialog_without_postal_code_cancels() {
        let dialog = AddressDialog::new("address");
        assert_eq!(dialog.confirm(), PickerOutcome::Cancelled);
        assert_eq!(tokio_test::block_on(dialog.lookup()), PickerOutcome::Cancelled);
    }

    #[test]
    fn test_address_focus_wraps() {
        let mut dialog = AddressDialog::new("address");
        for _ in 0..ADDRESS_INPUTS.len() {
            dialog.next_input();
        }
        assert_eq!(dialog.focus, 0);
        assert_eq!(dialog.input(0), "");
    }

    #[test]
    fn test_date_dialog_defaults_to_today() {
        let dialog = DateDialog::new("birthday", None, date(2024, 5, 1));
        assert_eq!(dialog.date, date(2024, 5, 1));
        let dialog = DateDialog::new("birthday", Some(date(1990, 1, 2)), date(2024, 5, 1));
        assert_eq!(dialog.date, date(1990, 1, 2));
    }

    #[test]
    fn test_date_steps_clamp_month_end() {
        let mut dialog = DateDialog::new("birthday", Some(date(2024, 1, 31)), date(2024, 1, 1));
        dialog.part = DatePart::Month;
        dialog.step(true);
        assert_eq!(dialog.date, date(2024, 2, 29));

        dialog.part = dialog.part.prev();
        dialog.step(true);
        assert_eq!(dialog.date, date(2025, 2, 28));

        dialog.part = DatePart::Day;
        dialog.step(true);
        assert_eq!(dialog.confirm(), PickerOutcome::Picked(date(2025, 3, 1)));
    }

    #[test]
    fn test_blank_image_path_yields_no_handle() {
        let mut dialog = ImageDialog::new("profile_image");
        dialog.path = "  ".into();
        assert_eq!(dialog.confirm(), PickerOutcome::Picked(None));
        dialog.path = " /tmp/me.png ".into();
        assert_eq!(
            tokio_test::block_on(dialog.pick_image()),
            PickerOutcome::Picked(Some("/tmp/me.png".to_string()))
        );
    }

    #[test]
    fn test_list_dialog_highlights_current() {
        let items = vec![
            ("M".to_string(), "M".to_string()),
            ("F".to_string(), "F".to_string()),
        ];
        let mut dialog = ListDialog::new("gender", ListKind::Options, items, "F");
        assert_eq!(dialog.highlighted, 1);
        dialog.move_down();
        assert_eq!(dialog.highlighted, 1);
        dialog.move_up();
        dialog.move_up();
        assert_eq!(dialog.confirm(), PickerOutcome::Picked("M".to_string()));
    }

    #[test]
    fn test_empty_list_cancels() {
        let dialog = ListDialog::new("region", ListKind::Options, Vec::new(), "");
        assert_eq!(dialog.confirm(), PickerOutcome::Cancelled);
    }
}
