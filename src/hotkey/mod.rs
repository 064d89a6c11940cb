//! Global hotkey triggers: purposes, key combinations and fallback
//! matching.
//!
//! Each logical trigger (a [`Purpose`]) has a fixed OS-level combination
//! registered through Carbon and a fixed alternate combination recognised
//! by the NSEvent fallback monitors. The registration state machine lives
//! in [`manager`]; the OS seam is the [`HotkeySystem`] trait in [`system`].

pub mod manager;
pub mod system;

pub use manager::{HotkeyDiagnostics, HotkeyManager, PurposeDiagnostics};
pub use system::{HotkeySystem, RetryTimer};

use crate::model::constants::{
    CARBON_CMD, CARBON_CONTROL, CARBON_OPTION, CARBON_SHIFT, HKID_QUICK_ADD, HKID_TOGGLE_WINDOW,
    KC_K, KC_P, NSEVENT_COMMAND, NSEVENT_CONTROL, NSEVENT_MODIFIER_MASK, NSEVENT_OPTION,
    NSEVENT_SHIFT,
};

/// A logical trigger, independent of its current binding state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Summon the Quick Add panel.
    QuickAdd,
    /// Toggle main window visibility.
    ToggleWindow,
}

impl Purpose {
    pub const ALL: [Purpose; 2] = [Purpose::QuickAdd, Purpose::ToggleWindow];

    /// Stable index into per-purpose arrays.
    pub fn index(self) -> usize {
        match self {
            Purpose::QuickAdd => 0,
            Purpose::ToggleWindow => 1,
        }
    }

    /// The Carbon hotkey id registered for this purpose.
    pub fn hotkey_id(self) -> u32 {
        match self {
            Purpose::QuickAdd => HKID_QUICK_ADD,
            Purpose::ToggleWindow => HKID_TOGGLE_WINDOW,
        }
    }

    /// Resolve a Carbon hotkey id back to its purpose.
    pub fn from_hotkey_id(id: u32) -> Option<Purpose> {
        Purpose::ALL.into_iter().find(|p| p.hotkey_id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Purpose::QuickAdd => "quick add",
            Purpose::ToggleWindow => "toggle window",
        }
    }
}

/// Outcome of the OS-level registration attempt for one purpose.
///
/// `Failed` keeps the raw OS status code verbatim so diagnostics can show
/// exactly what the OS said.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RegistrationStatus {
    Unregistered,
    Registered,
    Failed(i32),
}

/// An OS-level (Carbon) key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub key_code: u16,
    pub carbon_modifiers: u32,
}

/// The fixed OS-level combination for a purpose: Ctrl+Option+Cmd+K / +P.
pub fn primary_combo(purpose: Purpose) -> KeyCombo {
    let carbon_modifiers = CARBON_CONTROL | CARBON_OPTION | CARBON_CMD;
    match purpose {
        Purpose::QuickAdd => KeyCombo { key_code: KC_K, carbon_modifiers },
        Purpose::ToggleWindow => KeyCombo { key_code: KC_P, carbon_modifiers },
    }
}

/// The alternate combination recognised by the fallback monitors.
///
/// Matching is by exact modifier set (order independent, extra modifiers
/// reject the chord) plus either a physical key-code match or a
/// case-insensitive character match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackCombo {
    pub key_code: u16,
    pub character: char,
    /// Required NSEvent device-independent modifier flags.
    pub modifier_flags: u64,
}

impl FallbackCombo {
    /// Does a key-down event match this combination?
    ///
    /// `flags` are the event's raw modifier flags, `chars` the event's
    /// characters-ignoring-modifiers (may be empty for dead keys).
    pub fn matches(&self, flags: u64, key_code: u16, chars: &str) -> bool {
        if flags & NSEVENT_MODIFIER_MASK != self.modifier_flags {
            return false;
        }
        if key_code == self.key_code {
            return true;
        }
        chars.eq_ignore_ascii_case(&self.character.to_string())
    }
}

/// The fixed fallback combination for a purpose: Cmd+Shift+K / +P.
pub fn fallback_combo(purpose: Purpose) -> FallbackCombo {
    let modifier_flags = NSEVENT_COMMAND | NSEVENT_SHIFT;
    match purpose {
        Purpose::QuickAdd => FallbackCombo { key_code: KC_K, character: 'k', modifier_flags },
        Purpose::ToggleWindow => FallbackCombo { key_code: KC_P, character: 'p', modifier_flags },
    }
}

/// Match a key-down event against the fallback combinations of the
/// purposes whose fallback is currently active.
///
/// `active` is indexed by [`Purpose::index`]. At most one purpose matches
/// because the combinations are distinct.
pub fn match_fallback(flags: u64, key_code: u16, chars: &str, active: [bool; 2]) -> Option<Purpose> {
    Purpose::ALL
        .into_iter()
        .find(|p| active[p.index()] && fallback_combo(*p).matches(flags, key_code, chars))
}
