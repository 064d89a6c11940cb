//! The OS seam for hotkey registration.
//!
//! [`HotkeySystem`] is everything the registration state machine needs from
//! the operating system. The macOS implementation wraps Carbon and NSEvent
//! monitors; tests drive the machine with a scripted fake.

use std::time::Duration;

use super::{KeyCombo, Purpose};

/// A cancellable handle for a scheduled retry.
///
/// Cancelling an already-cancelled or fired timer is a no-op.
pub trait RetryTimer {
    fn cancel(&mut self);
}

/// OS-level operations the [`super::HotkeyManager`] drives.
///
/// Implementations own the raw handles (hotkey refs, the shared event
/// handler, the monitor pair) keyed by purpose; the manager only tracks
/// logical state and guarantees the acquire/release pairing.
pub trait HotkeySystem {
    type Timer: RetryTimer;

    /// Register an OS-level global hotkey for a purpose. Returns the raw OS
    /// status code; `0` means success. The implementation keeps the handle.
    fn register(&mut self, purpose: Purpose, combo: KeyCombo) -> i32;

    /// Release the OS-level hotkey for a purpose, if one is held.
    fn unregister(&mut self, purpose: Purpose);

    /// Install the single shared hotkey-pressed handler. Called at most
    /// once per registration cycle, and only after every registration
    /// attempt has completed. Returns false on failure.
    fn install_shared_handler(&mut self) -> bool;

    /// Remove the shared handler, if installed.
    fn remove_shared_handler(&mut self);

    /// Install the shared fallback monitor pair (one local, one global).
    /// At most one pair exists at a time. Returns false on failure.
    fn install_fallback_monitors(&mut self) -> bool;

    /// Remove the fallback monitor pair, if installed.
    fn remove_fallback_monitors(&mut self);

    /// Gate the shared monitors for one purpose on or off. Installing or
    /// removing the gate of one purpose must not disturb the other's.
    fn set_fallback_active(&mut self, purpose: Purpose, active: bool);

    /// Is the platform trust flag (Accessibility) granted?
    fn is_trusted(&self) -> bool;

    /// Surface the one-time permission prompt. The manager guarantees this
    /// is requested at most once per process.
    fn prompt_for_permission(&mut self);

    /// Schedule a registration retry after `delay`. The timer fires a
    /// retry opportunity on the main scheduling context.
    fn schedule_retry(&mut self, delay: Duration) -> Self::Timer;
}
