//! The host object: a minimal NSObject subclass that receives menu
//! actions, the text field action, timer ticks and window delegate
//! callbacks, and turns them into bus events or native calls.

use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
use objc2::sel;

use crate::events::{publish, AppEvent};
use crate::platform::macos::ffi::cocoa::{id, msg_send, nil, NO};
use crate::platform::macos::handlers;
use crate::platform::macos::ui::{main_window, quick_add};

static mut HOST: id = std::ptr::null_mut();

/// The shared host instance, created on first use.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn host_object() -> id {
    if HOST == nil {
        let cls = register_host_class();
        let host: id = msg_send![cls, new];
        HOST = host;
    }
    HOST
}

unsafe fn register_host_class() -> &'static AnyClass {
    let class_name = c"StackleHost";
    if let Some(cls) = AnyClass::get(class_name) {
        return cls;
    }
    let superclass = AnyClass::get(c"NSObject").unwrap();
    let mut builder = ClassBuilder::new(class_name, superclass).unwrap();

    // Status menu actions
    builder.add_method(
        sel!(openFromMenu:),
        open_from_menu as extern "C" fn(&mut AnyObject, Sel, id),
    );
    builder.add_method(
        sel!(quickAddFromMenu:),
        quick_add_from_menu as extern "C" fn(&mut AnyObject, Sel, id),
    );
    builder.add_method(
        sel!(retryFromMenu:),
        retry_from_menu as extern "C" fn(&mut AnyObject, Sel, id),
    );
    builder.add_method(
        sel!(diagnosticsFromMenu:),
        diagnostics_from_menu as extern "C" fn(&mut AnyObject, Sel, id),
    );
    builder.add_method(
        sel!(quitFromMenu:),
        quit_from_menu as extern "C" fn(&mut AnyObject, Sel, id),
    );

    // Quick Add text field action
    builder.add_method(
        sel!(quickAddSubmit:),
        quick_add_submit as extern "C" fn(&mut AnyObject, Sel, id),
    );

    // Main-loop tick timer
    builder.add_method(
        sel!(tickTimerFired:),
        tick_timer_fired as extern "C" fn(&mut AnyObject, Sel, id),
    );

    // Main window delegate: close hides
    builder.add_method(
        sel!(windowShouldClose:),
        window_should_close as extern "C" fn(&mut AnyObject, Sel, id) -> Bool,
    );

    // Quick Add panel delegate: losing key status dismisses
    builder.add_method(
        sel!(windowDidResignKey:),
        window_did_resign_key as extern "C" fn(&mut AnyObject, Sel, id),
    );

    builder.register()
}

extern "C" fn open_from_menu(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::ToggleMainWindow);
}

extern "C" fn quick_add_from_menu(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::ShowQuickAdd);
}

extern "C" fn retry_from_menu(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::RetryHotkeys);
}

extern "C" fn diagnostics_from_menu(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::ShowDiagnostics);
}

extern "C" fn quit_from_menu(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::RequestQuit);
}

extern "C" fn quick_add_submit(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    unsafe {
        quick_add::submit_from_field(sender);
    }
}

extern "C" fn tick_timer_fired(_this: &mut AnyObject, _cmd: Sel, _timer: id) {
    unsafe {
        handlers::tick();
    }
}

extern "C" fn window_should_close(_this: &mut AnyObject, _cmd: Sel, _sender: id) -> Bool {
    unsafe {
        main_window::hide();
    }
    NO
}

extern "C" fn window_did_resign_key(_this: &mut AnyObject, _cmd: Sel, notification: id) {
    unsafe {
        let window: id = msg_send![notification, object];
        quick_add::hide_if_resigned(window);
    }
}
