//! Dialog components for TUI

mod address_dialog;
mod base;
mod date_dialog;
mod error_dialog;
mod image_dialog;
mod list_dialog;

pub use address_dialog::render_address_dialog;
pub use date_dialog::render_date_dialog;
pub use error_dialog::render_error_dialog;
pub use image_dialog::render_image_dialog;
pub use list_dialog::render_list_dialog;
