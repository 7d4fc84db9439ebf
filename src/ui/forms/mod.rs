//! Form rendering module
//!
//! - `field_renderer`: field box and value line helpers
//! - `member_form`: the schema-driven member form

mod field_renderer;
mod member_form;

pub use member_form::draw as draw_member_form;
