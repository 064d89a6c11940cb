//! Status bar (menu bar) item with dropdown menu.
//!
//! Menu layout:
//! - Open/Hide Stackle
//! - Quick Add…            (Cmd+Shift+K, mirrors the fallback chord)
//! - ---
//! - Hotkeys: …            (disabled, live registration summary)
//! - Retry Hotkey Registration
//! - Hotkey Diagnostics…
//! - ---
//! - Quit Stackle          (Cmd+Q)

use crate::platform::macos::ffi::cocoa::{
    get_class, id, msg_send, nil, nsstring_id, sel, Sel, NSSize, NO, YES,
};

/// Strong references kept for the lifetime of the app.
static mut STATUS_ITEM: id = std::ptr::null_mut();
static mut OPEN_ITEM: id = std::ptr::null_mut();
static mut SUMMARY_ITEM: id = std::ptr::null_mut();

/// Install the status bar item with its menu. Actions target `host`.
///
/// # Safety
/// Must be called from the main thread, after the app is initialized.
pub unsafe fn install_status_bar(host: id) {
    let status_bar: id = msg_send![get_class("NSStatusBar"), systemStatusBar];

    // NSVariableStatusItemLength = -1.0
    let status_item: id = msg_send![status_bar, statusItemWithLength: -1.0f64];
    let _: id = msg_send![status_item, retain];
    STATUS_ITEM = status_item;

    let button: id = msg_send![status_item, button];
    if button != nil {
        let icon: id = msg_send![
            get_class("NSImage"),
            imageWithSystemSymbolName: nsstring_id("checklist"),
            accessibilityDescription: nil
        ];
        if icon != nil {
            let _: () = msg_send![icon, setSize: NSSize::new(18.0, 18.0)];
            let _: () = msg_send![icon, setTemplate: YES];
            let _: () = msg_send![button, setImage: icon];
        } else {
            let _: () = msg_send![button, setTitle: nsstring_id("St")];
        }
    }

    let menu = create_status_menu(host);
    let _: () = msg_send![status_item, setMenu: menu];
}

/// Update the disabled summary entry (e.g. "Hotkeys: active").
///
/// # Safety
/// Main thread only.
pub unsafe fn update_status_summary(summary: &str) {
    if SUMMARY_ITEM != nil {
        let _: () = msg_send![SUMMARY_ITEM, setTitle: nsstring_id(summary)];
    }
}

/// Keep the first menu entry in sync with window visibility.
///
/// # Safety
/// Main thread only.
pub unsafe fn update_open_item_title(window_visible: bool) {
    if OPEN_ITEM != nil {
        let title = if window_visible { "Hide Stackle" } else { "Open Stackle" };
        let _: () = msg_send![OPEN_ITEM, setTitle: nsstring_id(title)];
    }
}

unsafe fn create_status_menu(host: id) -> id {
    let menu: id = msg_send![get_class("NSMenu"), alloc];
    let menu: id = msg_send![menu, init];
    // Manual enabling so the summary entry stays disabled.
    let _: () = msg_send![menu, setAutoenablesItems: NO];

    let open = add_item(menu, host, "Open Stackle", sel!(openFromMenu:), "");
    let _: id = msg_send![open, retain];
    OPEN_ITEM = open;

    let quick_add = add_item(menu, host, "Quick Add\u{2026}", sel!(quickAddFromMenu:), "K");
    // Command (1 << 20) + Shift (1 << 17), matching the fallback chord.
    let _: () = msg_send![quick_add, setKeyEquivalentModifierMask: (1u64 << 20) | (1u64 << 17)];

    add_separator(menu);

    // Registration summary; updated by the tick via update_status_summary.
    let summary: id = msg_send![get_class("NSMenuItem"), new];
    let _: () = msg_send![summary, setTitle: nsstring_id("Hotkeys: unavailable")];
    let _: () = msg_send![summary, setEnabled: NO];
    let _: () = msg_send![menu, addItem: summary];
    let _: id = msg_send![summary, retain];
    SUMMARY_ITEM = summary;

    add_item(menu, host, "Retry Hotkey Registration", sel!(retryFromMenu:), "");
    add_item(menu, host, "Hotkey Diagnostics\u{2026}", sel!(diagnosticsFromMenu:), "");

    add_separator(menu);

    add_item(menu, host, "Quit Stackle", sel!(quitFromMenu:), "q");

    menu
}

unsafe fn add_item(menu: id, target: id, title: &str, action: Sel, key: &str) -> id {
    let item: id = msg_send![get_class("NSMenuItem"), alloc];
    let item: id = msg_send![
        item,
        initWithTitle: nsstring_id(title),
        action: action,
        keyEquivalent: nsstring_id(key)
    ];
    let _: () = msg_send![item, setTarget: target];
    let _: () = msg_send![item, setEnabled: YES];
    let _: () = msg_send![menu, addItem: item];
    item
}

unsafe fn add_separator(menu: id) {
    let separator: id = msg_send![get_class("NSMenuItem"), separatorItem];
    let _: () = msg_send![menu, addItem: separator];
}
