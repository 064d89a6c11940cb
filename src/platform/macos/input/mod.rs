//! Input plumbing: Carbon hotkeys, NSEvent fallback monitors and
//! lifecycle observers.

pub mod hotkeys;
pub mod monitors;
pub mod observers;

pub use hotkeys::{hotkey_event_handler, MacHotkeySystem, NsRetryTimer};
pub use observers::{install_activation_observer, install_termination_observer};
