//! Modal pickers as single-shot awaitable operations
//!
//! A picker either resolves with a value or is cancelled. Cancellation
//! never touches the form state.

use crate::codec::AddressLookup;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Result of one picker interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome<T> {
    Picked(T),
    Cancelled,
}

/// Postal address search
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressPicker: Send + Sync {
    async fn lookup(&self) -> PickerOutcome<AddressLookup>;
}

/// Calendar date selection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatePicker: Send + Sync {
    async fn pick_date(&self, initial: Option<NaiveDate>) -> PickerOutcome<NaiveDate>;
}

/// Image library selection
///
/// `Picked(None)` means the picker closed normally but produced no usable
/// resource handle, which the image codec reports as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick_image(&self) -> PickerOutcome<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Today(NaiveDate);

    #[async_trait]
    impl DatePicker for Today {
        async fn pick_date(&self, initial: Option<NaiveDate>) -> PickerOutcome<NaiveDate> {
            PickerOutcome::Picked(initial.unwrap_or(self.0))
        }
    }

    #[test]
    fn test_date_picker_prefers_initial() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let stored = NaiveDate::from_ymd_opt(1990, 1, 2).unwrap();
        let picker = Today(today);
        assert_eq!(
            tokio_test::block_on(picker.pick_date(None)),
            PickerOutcome::Picked(today)
        );
        assert_eq!(
            tokio_test::block_on(picker.pick_date(Some(stored))),
            PickerOutcome::Picked(stored)
        );
    }
}
