//! Native macOS shell for the Stackle to-do app.
//!
//! The crate is split into a pure core and a platform layer. Everything at
//! this level (`model`, `events`, `hotkey`, `bridge`) is free of macOS FFI so
//! tests can run as normal integration tests on any platform. The
//! `platform::macos` module wires the core to Carbon hotkeys, NSEvent
//! monitors and AppKit.

pub mod bridge;
pub mod events;
pub mod hotkey;
pub mod model;

#[cfg(target_os = "macos")]
pub mod platform;

// Re-export the types most callers need.
pub use bridge::{BridgeDispatcher, BridgeError, Responder, ShellActions};
pub use events::{AppEvent, EventBus, EventPublisher};
pub use hotkey::{HotkeyManager, HotkeySystem, Purpose, RegistrationStatus};

/// Clamp a value to [lo, hi].
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Normalise Quick Add input: trim whitespace (including newlines) and
/// reject empty submissions. Returns `None` when nothing should be emitted.
pub fn normalize_submission(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
