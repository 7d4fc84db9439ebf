//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::Dialog;
use components::{
    render_address_dialog, render_date_dialog, render_error_dialog, render_image_dialog,
    render_list_dialog,
};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    forms::draw_member_form(frame, main_area, app);
    layout::draw_status_bar(frame, app);

    // Overlays: picker first, errors on top
    match &app.state.dialog {
        Some(Dialog::Address(dialog)) => render_address_dialog(frame, dialog),
        Some(Dialog::Date(dialog)) => render_date_dialog(frame, dialog),
        Some(Dialog::Image(dialog)) => render_image_dialog(frame, dialog),
        Some(Dialog::List(dialog)) => render_list_dialog(frame, dialog),
        None => {}
    }

    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    }
}
