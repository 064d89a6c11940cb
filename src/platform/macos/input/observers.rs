//! Application lifecycle observers.
//!
//! Foreground activation doubles as an opportunistic retry for hotkey
//! registration; termination releases every native resource.

use crate::events::{publish, AppEvent};
use crate::platform::macos::app;
use crate::platform::macos::ffi::cocoa::{get_class, id, msg_send, nil, RcBlock};

/// Observe NSApplicationDidBecomeActiveNotification and publish an
/// activation event.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_activation_observer() {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];
    let block = RcBlock::new(move |_note: id| {
        publish(AppEvent::AppActivated);
    });
    let name: id = msg_send![
        get_class("NSString"),
        stringWithUTF8String: c"NSApplicationDidBecomeActiveNotification".as_ptr()
    ];
    let _: id =
        msg_send![center, addObserverForName: name, object: nil, queue: nil, usingBlock: &*block];
}

/// Observe NSApplicationWillTerminateNotification and tear the shell
/// down: cancel retries, release hotkeys, detach the bridge.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_termination_observer() {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];
    let block = RcBlock::new(move |_note: id| {
        app::shutdown();
    });
    let name: id = msg_send![
        get_class("NSString"),
        stringWithUTF8String: c"NSApplicationWillTerminateNotification".as_ptr()
    ];
    let _: id =
        msg_send![center, addObserverForName: name, object: nil, queue: nil, usingBlock: &*block];
}
