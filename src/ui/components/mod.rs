//! Reusable UI components

mod dialog;

pub use dialog::{
    render_address_dialog, render_date_dialog, render_error_dialog, render_image_dialog,
    render_list_dialog,
};
