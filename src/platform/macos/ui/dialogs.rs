//! Modal surfaces: database file pickers, the hotkey diagnostics alert
//! and the Accessibility settings deep link.

use std::cell::RefCell;

use crate::bridge::{DatabaseDialog, PathReply};
use crate::model::constants::{DATABASE_DEFAULT_NAME, DATABASE_EXTENSIONS};
use crate::platform::macos::ffi::cocoa::{
    get_class, id, msg_send, nil, nsstring_id, nsstring_to_string, RcBlock, NO, YES,
};
use crate::platform::macos::ui::main_window;

const MODAL_OK: i64 = 1; // NSModalResponseOK

/// Present the save/open panel for a database file and hand the chosen
/// path (or `None` on cancel) to `reply`.
///
/// The main window is surfaced first and the panel attached to it as a
/// sheet, which keeps the run loop (and the tick) going; before the
/// window exists the panel falls back to app-modal.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn choose_database_path(dialog: DatabaseDialog, reply: PathReply) {
    let panel: id = match dialog {
        DatabaseDialog::Create => {
            let panel: id = msg_send![get_class("NSSavePanel"), savePanel];
            let _: () = msg_send![panel, setCanCreateDirectories: YES];
            let _: () = msg_send![panel, setNameFieldStringValue: nsstring_id(DATABASE_DEFAULT_NAME)];
            panel
        }
        DatabaseDialog::Open => {
            let panel: id = msg_send![get_class("NSOpenPanel"), openPanel];
            let _: () = msg_send![panel, setCanChooseDirectories: NO];
            let _: () = msg_send![panel, setAllowsMultipleSelection: NO];
            panel
        }
    };

    let extensions: id = msg_send![get_class("NSMutableArray"), array];
    for ext in DATABASE_EXTENSIONS {
        let _: () = msg_send![extensions, addObject: nsstring_id(ext)];
    }
    let _: () = msg_send![panel, setAllowedFileTypes: extensions];

    main_window::show();
    let window = main_window::handle();
    if window != nil {
        // The sheet completion may only fire once, but the take-once cell
        // keeps the FnOnce reply sound either way.
        let panel_ptr = panel as usize;
        let pending = RefCell::new(Some(reply));
        let block = RcBlock::new(move |response: i64| {
            if let Some(reply) = pending.borrow_mut().take() {
                reply(unsafe { chosen_path(panel_ptr as id, response) });
            }
        });
        let _: () = msg_send![
            panel,
            beginSheetModalForWindow: window,
            completionHandler: &*block
        ];
        return;
    }

    let response: i64 = msg_send![panel, runModal];
    reply(chosen_path(panel, response));
}

/// The panel's chosen path for an OK response, `None` otherwise.
///
/// # Safety
/// Main thread only; `panel` must be a live save/open panel.
unsafe fn chosen_path(panel: id, response: i64) -> Option<String> {
    if response != MODAL_OK {
        return None;
    }
    let url: id = msg_send![panel, URL];
    if url == nil {
        return None;
    }
    let path: id = msg_send![url, path];
    Some(nsstring_to_string(path))
}

/// Show the hotkey diagnostics alert.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn show_diagnostics(text: &str) {
    let alert: id = msg_send![get_class("NSAlert"), alloc];
    let alert: id = msg_send![alert, init];
    let _: () = msg_send![alert, setMessageText: nsstring_id("Hotkey Diagnostics")];
    let _: () = msg_send![alert, setInformativeText: nsstring_id(text)];
    let _: id = msg_send![alert, addButtonWithTitle: nsstring_id("OK")];
    let _: i64 = msg_send![alert, runModal];
    let _: () = msg_send![alert, release];
}

/// Open System Settings at the Accessibility privacy pane.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn open_accessibility_settings() {
    let link =
        "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";
    let url: id = msg_send![get_class("NSURL"), URLWithString: nsstring_id(link)];
    let workspace: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
    let _: bool = msg_send![workspace, openURL: url];
}
