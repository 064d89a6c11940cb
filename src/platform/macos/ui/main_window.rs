//! The main window and its content-driven resizing.
//!
//! The window keeps its top edge fixed while the UI runtime drives its
//! content height over the bridge. Closing hides instead of destroying,
//! so toggling it back is instant.

use crate::model::constants::FALLBACK_MAX_CONTENT_HEIGHT;
use crate::model::geometry::{max_content_height_for_screen, resize_keeping_top, WindowFrame};
use crate::platform::macos::ffi::cocoa::{
    get_class, id, msg_send, nil, nsstring_id, NSApp, NSPoint, NSRect, NSSize, NO, YES,
};

const DEFAULT_WIDTH: f64 = 480.0;
const DEFAULT_HEIGHT: f64 = 520.0;

static mut MAIN_WINDOW: id = std::ptr::null_mut();

/// Create the main window. `delegate` receives windowShouldClose: so the
/// close button hides instead of destroying.
///
/// # Safety
/// Must be called from the main thread, once.
pub unsafe fn create_main_window(delegate: id) {
    // titled | closable | miniaturizable | fullSizeContentView
    let style_mask: u64 = 1 | 2 | 4 | (1 << 15);
    let backing: u64 = 2; // buffered

    let rect = NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
    let window: id = msg_send![get_class("NSWindow"), alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: rect,
        styleMask: style_mask,
        backing: backing,
        defer: NO
    ];

    let _: () = msg_send![window, setTitle: nsstring_id("Stackle")];
    // Seamless chrome: hidden title, transparent title bar, draggable body.
    let _: () = msg_send![window, setTitlebarAppearsTransparent: YES];
    let _: () = msg_send![window, setTitleVisibility: 1i64]; // hidden
    let _: () = msg_send![window, setMovableByWindowBackground: YES];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setDelegate: delegate];
    let _: () = msg_send![window, center];

    // Hide the traffic lights; closing goes through windowShouldClose and
    // hides instead.
    for button in 0i64..=2 {
        let standard: id = msg_send![window, standardWindowButton: button];
        if standard != nil {
            let _: () = msg_send![standard, setHidden: YES];
        }
    }

    let _: id = msg_send![window, retain];
    MAIN_WINDOW = window;
}

/// The raw window handle, nil before creation.
///
/// # Safety
/// Main thread only.
pub unsafe fn handle() -> id {
    MAIN_WINDOW
}

/// # Safety
/// Main thread only.
pub unsafe fn is_visible() -> bool {
    if MAIN_WINDOW == nil {
        return false;
    }
    let visible: bool = msg_send![MAIN_WINDOW, isVisible];
    visible
}

/// # Safety
/// Main thread only.
pub unsafe fn show() {
    if MAIN_WINDOW == nil {
        return;
    }
    let app = NSApp();
    let _: () = msg_send![app, activateIgnoringOtherApps: YES];
    let _: () = msg_send![MAIN_WINDOW, makeKeyAndOrderFront: nil];
}

/// Hiding an already-hidden window is a no-op.
///
/// # Safety
/// Main thread only.
pub unsafe fn hide() {
    if MAIN_WINDOW != nil {
        let _: () = msg_send![MAIN_WINDOW, orderOut: nil];
    }
}

/// # Safety
/// Main thread only.
pub unsafe fn toggle() {
    if is_visible() {
        hide();
    } else {
        show();
    }
}

/// Resize to the given content height, keeping the top edge fixed. The
/// caller has already clamped the value; sub-epsilon changes are dropped
/// here to avoid churn.
///
/// # Safety
/// Main thread only.
pub unsafe fn set_content_height(content_height: f64) {
    if MAIN_WINDOW == nil {
        return;
    }
    let frame: NSRect = msg_send![MAIN_WINDOW, frame];
    let content: NSRect = msg_send![MAIN_WINDOW, contentRectForFrameRect: frame];
    let chrome = frame.size.height - content.size.height;

    let current = WindowFrame {
        x: frame.origin.x,
        y: frame.origin.y,
        width: frame.size.width,
        height: frame.size.height,
    };
    if let Some(next) = resize_keeping_top(current, content_height + chrome) {
        let rect = NSRect::new(NSPoint::new(next.x, next.y), NSSize::new(next.width, next.height));
        let _: () = msg_send![MAIN_WINDOW, setFrame: rect, display: YES, animate: NO];
    }
}

/// Screen-derived maximum content height, from the window's screen or the
/// main screen; a fixed fallback when neither exists.
///
/// # Safety
/// Main thread only.
pub unsafe fn max_content_height() -> f64 {
    let mut screen: id = nil;
    if MAIN_WINDOW != nil {
        screen = msg_send![MAIN_WINDOW, screen];
    }
    if screen == nil {
        screen = msg_send![get_class("NSScreen"), mainScreen];
    }
    if screen == nil {
        return FALLBACK_MAX_CONTENT_HEIGHT;
    }
    let visible: NSRect = msg_send![screen, visibleFrame];
    max_content_height_for_screen(visible.size.height)
}
