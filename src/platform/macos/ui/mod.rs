//! AppKit surfaces: main window, Quick Add panel, status bar menu and
//! modal dialogs.

pub mod dialogs;
pub mod main_window;
pub mod quick_add;
pub mod status_bar;

pub use status_bar::{install_status_bar, update_open_item_title, update_status_summary};
