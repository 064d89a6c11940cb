//! NSEvent fallback key monitors.
//!
//! One local and one global key-down monitor form the shared fallback
//! pair. Both feed the same matcher; per-purpose gating happens through
//! atomics so the manager can flip a purpose on or off without touching
//! the monitors themselves.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::publish;
use crate::events::AppEvent;
use crate::hotkey::{match_fallback, Purpose};
use crate::platform::macos::ffi::cocoa::{
    get_class, id, msg_send, nil, nsstring_to_string, RcBlock,
};

const KEY_DOWN_MASK: u64 = 1 << 10;

/// Per-purpose gates, indexed by [`Purpose::index`]. Written by the
/// manager on the main thread, read inside the monitor blocks.
static FALLBACK_GATES: [AtomicBool; 2] = [AtomicBool::new(false), AtomicBool::new(false)];

static mut LOCAL_MONITOR: id = std::ptr::null_mut();
static mut GLOBAL_MONITOR: id = std::ptr::null_mut();

/// Gate the fallback chord of one purpose on or off.
pub fn set_fallback_gate(purpose: Purpose, active: bool) {
    FALLBACK_GATES[purpose.index()].store(active, Ordering::SeqCst);
}

fn gates() -> [bool; 2] {
    [
        FALLBACK_GATES[0].load(Ordering::SeqCst),
        FALLBACK_GATES[1].load(Ordering::SeqCst),
    ]
}

/// Match one key-down event against the active fallback chords and
/// publish the trigger event on a hit.
///
/// # Safety
/// `event` must be a valid NSEvent of type key-down.
unsafe fn handle_key_event(event: id) -> Option<Purpose> {
    let flags: u64 = msg_send![event, modifierFlags];
    let key_code: u16 = msg_send![event, keyCode];
    let chars_ns: id = msg_send![event, charactersIgnoringModifiers];
    let chars = nsstring_to_string(chars_ns);

    let purpose = match_fallback(flags, key_code, &chars, gates())?;
    publish(AppEvent::for_purpose(purpose));
    Some(purpose)
}

/// Install the shared local+global monitor pair. At most one pair exists;
/// returns false when either half could not be created.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_fallback_monitors() -> bool {
    if LOCAL_MONITOR != nil || GLOBAL_MONITOR != nil {
        remove_fallback_monitors();
    }

    let cls = get_class("NSEvent");

    // Local monitor: consumes the event on a hit so the chord does not
    // also reach the focused view.
    let local_block = RcBlock::new(move |event: id| -> id {
        let hit = unsafe { handle_key_event(event) };
        if hit.is_some() {
            nil
        } else {
            event
        }
    });
    let local: id = msg_send![
        cls,
        addLocalMonitorForEventsMatchingMask: KEY_DOWN_MASK,
        handler: &*local_block
    ];

    // Global monitor: observe-only, events in other apps cannot be
    // consumed.
    let global_block = RcBlock::new(move |event: id| {
        let _ = unsafe { handle_key_event(event) };
    });
    let global: id = msg_send![
        cls,
        addGlobalMonitorForEventsMatchingMask: KEY_DOWN_MASK,
        handler: &*global_block
    ];

    LOCAL_MONITOR = local;
    GLOBAL_MONITOR = global;

    if local == nil || global == nil {
        remove_fallback_monitors();
        return false;
    }
    true
}

/// Remove whichever halves of the monitor pair exist.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn remove_fallback_monitors() {
    let cls = get_class("NSEvent");
    if LOCAL_MONITOR != nil {
        let _: () = msg_send![cls, removeMonitor: LOCAL_MONITOR];
        LOCAL_MONITOR = nil;
    }
    if GLOBAL_MONITOR != nil {
        let _: () = msg_send![cls, removeMonitor: GLOBAL_MONITOR];
        GLOBAL_MONITOR = nil;
    }
}
