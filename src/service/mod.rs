//! Member service module for schema fetch and form submission

mod client;
mod traits;

pub use client::{parse_form_page, HttpFormService, PREFILL_KEYS};
pub use traits::{FetchedSchema, FormService};

#[cfg(test)]
pub use traits::MockFormService;
