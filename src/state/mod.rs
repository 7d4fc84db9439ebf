//! Application state module

mod app_state;
mod dialog;
mod forms;

pub use app_state::*;
pub use dialog::*;
pub use forms::*;
