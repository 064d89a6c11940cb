//! Configuration constants: hotkey combinations, Carbon codes, window
//! geometry limits, bridge channel names and retry timing.

use std::time::Duration;

// === Bridge channel ===

/// Method channel name the UI runtime binds to.
pub const CHANNEL_NAME: &str = "stackle/native";

/// Event sent toward the UI runtime on a successful Quick Add submission.
pub const EVENT_QUICK_ADD_SUBMITTED: &str = "quickAddSubmitted";

// === Carbon hotkey registration ===

/// Four-char signature carried by every hotkey we register: 'STKL'.
pub const HOTKEY_SIGNATURE: u32 = 0x5354_4B4C;

/// Hotkey id for the Quick Add trigger.
pub const HKID_QUICK_ADD: u32 = 1;

/// Hotkey id for the main window toggle trigger.
pub const HKID_TOGGLE_WINDOW: u32 = 2;

// Carbon modifier masks (Events.h).
pub const CARBON_CMD: u32 = 1 << 8;
pub const CARBON_SHIFT: u32 = 1 << 9;
pub const CARBON_OPTION: u32 = 1 << 11;
pub const CARBON_CONTROL: u32 = 1 << 12;

// ANSI virtual key codes.
pub const KC_K: u16 = 40;
pub const KC_P: u16 = 35;

/// Escape key code (used by the Quick Add panel's key monitor).
pub const KC_ESCAPE: u16 = 53;

// === NSEvent modifier flags (device independent) ===

pub const NSEVENT_SHIFT: u64 = 1 << 17;
pub const NSEVENT_CONTROL: u64 = 1 << 18;
pub const NSEVENT_OPTION: u64 = 1 << 19;
pub const NSEVENT_COMMAND: u64 = 1 << 20;

/// The modifier bits a fallback combination is matched against. Caps lock
/// and fn are deliberately excluded; any extra bit inside this mask rejects
/// the chord.
pub const NSEVENT_MODIFIER_MASK: u64 =
    NSEVENT_SHIFT | NSEVENT_CONTROL | NSEVENT_OPTION | NSEVENT_COMMAND;

// === Retry policy ===

/// Startup retry schedule: a short bounded backoff within the first few
/// seconds. All timers are cancelled once registration fully succeeds.
pub const RETRY_DELAYS: [Duration; 3] = [
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(4),
];

// === Main window geometry ===

/// Minimum content height the UI runtime may request.
pub const MIN_CONTENT_HEIGHT: f64 = 120.0;

/// Maximum content height when no screen is available to derive one from.
pub const FALLBACK_MAX_CONTENT_HEIGHT: f64 = 520.0;

/// Margin kept free above/below the window when deriving the maximum
/// content height from the screen's visible frame.
pub const SCREEN_HEIGHT_MARGIN: f64 = 120.0;

/// Height changes smaller than this are ignored to avoid resize churn.
pub const HEIGHT_EPSILON: f64 = 1.0;

// === Quick Add panel ===

pub const QUICK_ADD_PANEL_WIDTH: f64 = 620.0;
pub const QUICK_ADD_PANEL_HEIGHT: f64 = 84.0;
pub const QUICK_ADD_PLACEHOLDER: &str = "What's on your mind?";

// === Database pickers ===

/// Extensions both pickers are restricted to.
pub const DATABASE_EXTENSIONS: [&str; 3] = ["db", "sqlite", "sqlite3"];

/// Default file name offered by the save panel.
pub const DATABASE_DEFAULT_NAME: &str = "todos.db";
