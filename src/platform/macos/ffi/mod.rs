//! Low-level macOS bindings: Carbon hotkeys, Cocoa helpers and the
//! Accessibility trust API.

pub mod accessibility;
pub mod carbon;
pub mod cocoa;

pub use accessibility::{is_process_trusted, prompt_for_accessibility};
pub use carbon::*;
