//! The floating Quick Add panel.
//!
//! A small always-on-top panel with a single text field. Submitting
//! publishes the trimmed text to the bus (empty input publishes nothing);
//! Escape or deactivation dismisses it.

use crate::events::{publish, AppEvent};
use crate::model::constants::{
    KC_ESCAPE, QUICK_ADD_PANEL_HEIGHT, QUICK_ADD_PANEL_WIDTH, QUICK_ADD_PLACEHOLDER,
};
use crate::normalize_submission;
use crate::platform::macos::ffi::cocoa::{
    get_class, id, msg_send, nil, nsstring_id, nsstring_to_string, NSApp, NSPoint, NSRect, NSSize,
    RcBlock, NO, YES,
};

static mut PANEL: id = std::ptr::null_mut();
static mut FIELD: id = std::ptr::null_mut();

/// Summon the panel, creating it lazily. Showing an already-visible panel
/// just refocuses the field.
///
/// # Safety
/// Must be called from the main thread. `host` is the action target for
/// the text field.
pub unsafe fn show(host: id) {
    if PANEL == nil {
        create_panel(host);
    }

    let _: () = msg_send![FIELD, setStringValue: nsstring_id("")];
    position_on_main_screen();

    let app = NSApp();
    let _: () = msg_send![app, activateIgnoringOtherApps: YES];
    let _: () = msg_send![PANEL, makeKeyAndOrderFront: nil];
    let _: bool = msg_send![PANEL, makeFirstResponder: FIELD];
}

/// # Safety
/// Main thread only.
pub unsafe fn hide() {
    if PANEL != nil {
        let _: () = msg_send![PANEL, orderOut: nil];
    }
}

/// Delegate path: dismiss when the panel itself stops being key. Other
/// windows resigning key status are left alone.
///
/// # Safety
/// Main thread only.
pub unsafe fn hide_if_resigned(window: id) {
    if window != nil && window == PANEL {
        hide();
    }
}

/// Text field action: trim and publish when non-empty, then dismiss.
/// Whitespace-only input publishes nothing and leaves the panel open.
///
/// # Safety
/// Main thread only; `sender` is the panel's NSTextField.
pub unsafe fn submit_from_field(sender: id) {
    let value: id = msg_send![sender, stringValue];
    let raw = nsstring_to_string(value);
    if let Some(text) = normalize_submission(&raw) {
        publish(AppEvent::QuickAddSubmitted(text));
        let _: () = msg_send![sender, setStringValue: nsstring_id("")];
        hide();
    }
}

unsafe fn create_panel(host: id) {
    // titled | fullSizeContentView; the transparent title bar leaves a
    // plain rounded slab.
    let style_mask: u64 = 1 | (1 << 15);
    let backing: u64 = 2;

    let rect = NSRect::new(
        NSPoint::new(0.0, 0.0),
        NSSize::new(QUICK_ADD_PANEL_WIDTH, QUICK_ADD_PANEL_HEIGHT),
    );
    let panel: id = msg_send![get_class("NSPanel"), alloc];
    let panel: id = msg_send![
        panel,
        initWithContentRect: rect,
        styleMask: style_mask,
        backing: backing,
        defer: NO
    ];

    let _: () = msg_send![panel, setTitlebarAppearsTransparent: YES];
    let _: () = msg_send![panel, setTitleVisibility: 1i64]; // hidden
    let _: () = msg_send![panel, setMovableByWindowBackground: YES];
    let _: () = msg_send![panel, setLevel: 3i64]; // floating
    let _: () = msg_send![panel, setHidesOnDeactivate: YES];
    let _: () = msg_send![panel, setReleasedWhenClosed: NO];
    // The host's windowDidResignKey: dismisses the panel on in-app focus
    // loss; setHidesOnDeactivate only covers app deactivation.
    let _: () = msg_send![panel, setDelegate: host];
    // CanJoinAllSpaces (1) + FullScreenAuxiliary (256)
    let _: () = msg_send![panel, setCollectionBehavior: 257u64];

    let content: id = msg_send![panel, contentView];

    let inset = 20.0;
    let field_height = 32.0;
    let field_rect = NSRect::new(
        NSPoint::new(inset, (QUICK_ADD_PANEL_HEIGHT - field_height) / 2.0),
        NSSize::new(QUICK_ADD_PANEL_WIDTH - inset * 2.0, field_height),
    );
    let field: id = msg_send![get_class("NSTextField"), alloc];
    let field: id = msg_send![field, initWithFrame: field_rect];
    let _: () = msg_send![field, setBezeled: NO];
    let _: () = msg_send![field, setDrawsBackground: NO];
    let _: () = msg_send![field, setFocusRingType: 1i64]; // none
    let font: id = msg_send![get_class("NSFont"), systemFontOfSize: 20.0f64];
    let _: () = msg_send![field, setFont: font];
    let _: () = msg_send![field, setPlaceholderString: nsstring_id(QUICK_ADD_PLACEHOLDER)];
    let _: () = msg_send![field, setTarget: host];
    let _: () = msg_send![field, setAction: objc2::sel!(quickAddSubmit:)];
    let _: () = msg_send![content, addSubview: field];

    let _: id = msg_send![panel, retain];
    let _: id = msg_send![field, retain];
    PANEL = panel;
    FIELD = field;

    install_escape_monitor();
}

/// Local key monitor that dismisses the panel on Escape while it is key.
/// Installed once with the panel; both live for the app's lifetime.
unsafe fn install_escape_monitor() {
    const KEY_DOWN_MASK: u64 = 1 << 10;
    let block = RcBlock::new(move |event: id| -> id {
        unsafe {
            let key_window: id = msg_send![NSApp(), keyWindow];
            if PANEL != nil && key_window == PANEL {
                let key_code: u16 = msg_send![event, keyCode];
                if key_code == KC_ESCAPE {
                    hide();
                    return nil;
                }
            }
        }
        event
    });
    let _: id = msg_send![
        get_class("NSEvent"),
        addLocalMonitorForEventsMatchingMask: KEY_DOWN_MASK,
        handler: &*block
    ];
}

/// Centered horizontally, in the upper third of the main screen.
unsafe fn position_on_main_screen() {
    let screen: id = msg_send![get_class("NSScreen"), mainScreen];
    if screen == nil {
        let _: () = msg_send![PANEL, center];
        return;
    }
    let visible: NSRect = msg_send![screen, visibleFrame];
    let x = visible.origin.x + (visible.size.width - QUICK_ADD_PANEL_WIDTH) / 2.0;
    let y = visible.origin.y + visible.size.height * 0.62;
    let _: () = msg_send![PANEL, setFrameOrigin: NSPoint::new(x, y)];
}
