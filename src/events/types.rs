//! Application events for inter-module communication.
//!
//! Pure Rust, no FFI. Events flow from producers (hotkeys, fallback
//! monitors, the status menu, the bridge) through the bus to the main-loop
//! dispatcher.

use crate::hotkey::Purpose;

/// Application-level events for decoupled communication between modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Summon the Quick Add panel (hotkey, menu or bridge).
    ShowQuickAdd,

    /// Toggle main window visibility (hotkey or menu).
    ToggleMainWindow,

    /// The user submitted non-empty Quick Add text; forward it to the UI
    /// runtime as `quickAddSubmitted`.
    QuickAddSubmitted(String),

    /// Re-run the hotkey registration cycle (menu entry, retry timer).
    RetryHotkeys,

    /// The application regained foreground focus; retry registration
    /// opportunistically under the usual already-registered guard.
    AppActivated,

    /// Show the hotkey diagnostics alert (menu entry).
    ShowDiagnostics,

    /// Terminate the application.
    RequestQuit,
}

impl AppEvent {
    /// True when the event should trigger a guarded registration refresh.
    pub fn triggers_hotkey_refresh(&self) -> bool {
        matches!(self, AppEvent::RetryHotkeys | AppEvent::AppActivated)
    }

    /// A hotkey trigger event for the given purpose.
    pub fn for_purpose(purpose: Purpose) -> Self {
        match purpose {
            Purpose::QuickAdd => AppEvent::ShowQuickAdd,
            Purpose::ToggleWindow => AppEvent::ToggleMainWindow,
        }
    }
}
