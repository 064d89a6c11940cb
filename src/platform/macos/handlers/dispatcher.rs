//! Main-loop tick: drains the event bus and the bridge request queue.
//!
//! ```text
//! take_event()   → handle_event()  → native actions
//! take_request() → BridgeDispatcher::dispatch()
//! ```
//!
//! Runs from the ~60fps NSTimer on the main thread, so every native
//! action here is main-thread by construction.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::bridge::{emit_quick_add_submitted, take_request};
use crate::events::{take_event, AppEvent};
use crate::platform::macos::app::{detach_state, host_object, restore_state, with_state};
use crate::platform::macos::ffi::cocoa::{id, msg_send, nil, NSApp};
use crate::platform::macos::ui::{
    main_window, quick_add, update_open_item_title, update_status_summary,
};

/// Guard against re-entrant ticks. The run loop keeps firing timers while
/// a modal (diagnostics alert, file panel) is open; without this, a second
/// tick would race the first for the state borrow.
static TICK_GUARD: AtomicBool = AtomicBool::new(false);

/// Drain all pending events and bridge requests.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn tick() {
    if TICK_GUARD
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    while let Some(event) = take_event() {
        handle_event(event);
    }

    // Dispatch with the state detached from its cell: the picker commands
    // block in a modal, and the termination observer may need the cell
    // before the modal returns.
    match detach_state() {
        Some(mut state) => {
            while let Some(request) = take_request() {
                state
                    .bridge
                    .dispatch(&request.name, &request.argument, request.responder);
            }
            restore_state(state);
        }
        None => {
            while let Some(request) = take_request() {
                debug!("bridge request {} arrived with no shell state", request.name);
                // Dropping the responder delivers Unavailable.
                drop(request);
            }
        }
    }

    refresh_status_summary();

    TICK_GUARD.store(false, Ordering::SeqCst);
}

unsafe fn handle_event(event: AppEvent) {
    match event {
        AppEvent::ShowQuickAdd => {
            quick_add::show(host_object());
        }
        AppEvent::ToggleMainWindow => {
            main_window::toggle();
        }
        AppEvent::QuickAddSubmitted(text) => {
            emit_quick_add_submitted(&text);
        }
        AppEvent::RetryHotkeys | AppEvent::AppActivated => {
            let _ = with_state(|state| state.hotkeys.on_retry_opportunity());
        }
        AppEvent::ShowDiagnostics => {
            // Snapshot first; the alert blocks and must not hold the
            // state borrow.
            let text = with_state(|state| state.hotkeys.diagnostics().to_string());
            if let Some(text) = text {
                crate::platform::macos::ui::dialogs::show_diagnostics(&text);
            }
        }
        AppEvent::RequestQuit => {
            let app: id = NSApp();
            let _: () = msg_send![app, terminate: nil];
        }
    }
}

unsafe fn refresh_status_summary() {
    if let Some(summary) = with_state(|state| state.hotkeys.diagnostics().summary()) {
        update_status_summary(summary);
    }
    update_open_item_title(main_window::is_visible());
}
