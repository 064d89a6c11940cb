//! Application assembly: state, the native shell surface and the run
//! loop.

pub mod host;

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::bridge::{BridgeDispatcher, DatabaseDialog, PathReply, ShellActions};
use crate::hotkey::HotkeyManager;
use crate::platform::macos::ffi::cocoa::{
    autoreleasepool, get_class, id, msg_send, nil, nsstring_id, NSApp, YES,
};
use crate::platform::macos::input::{
    install_activation_observer, install_termination_observer, MacHotkeySystem,
};
use crate::platform::macos::ui;

pub use host::host_object;

/// The native surface the bridge drives, backed by the AppKit modules.
pub struct MacShell;

impl ShellActions for MacShell {
    fn show_quick_add_panel(&mut self) {
        unsafe {
            ui::quick_add::show(host_object());
        }
    }

    fn choose_database_path(&mut self, dialog: DatabaseDialog, reply: PathReply) {
        unsafe {
            ui::dialogs::choose_database_path(dialog, reply);
        }
    }

    fn is_accessibility_trusted(&self) -> bool {
        crate::platform::macos::ffi::is_process_trusted()
    }

    fn open_accessibility_settings(&mut self) {
        unsafe {
            ui::dialogs::open_accessibility_settings();
        }
    }

    fn activate_app(&mut self) {
        unsafe {
            let app = NSApp();
            let _: () = msg_send![app, activateIgnoringOtherApps: YES];
        }
    }

    fn show_main_window(&mut self) {
        unsafe {
            ui::main_window::show();
        }
    }

    fn hide_main_window(&mut self) {
        unsafe {
            ui::main_window::hide();
        }
    }

    fn toggle_main_window(&mut self) {
        unsafe {
            ui::main_window::toggle();
        }
    }

    fn set_main_window_height(&mut self, content_height: f64) {
        unsafe {
            ui::main_window::set_content_height(content_height);
        }
    }

    fn max_content_height(&self) -> f64 {
        unsafe { ui::main_window::max_content_height() }
    }

    fn quit(&mut self) {
        unsafe {
            let app = NSApp();
            let _: () = msg_send![app, terminate: nil];
        }
    }
}

/// Everything the tick needs to reach: the hotkey state machine and the
/// bridge dispatcher with its attached shell.
pub struct AppState {
    pub hotkeys: HotkeyManager<MacHotkeySystem>,
    pub bridge: BridgeDispatcher<MacShell>,
}

thread_local! {
    static STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

/// Run `f` against the app state. Returns `None` before startup, after
/// shutdown or while the state is detached. Main-thread only; the state
/// never leaves this thread.
pub fn with_state<R>(f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
    STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Take the state out of its cell so work that can block (the modal file
/// pickers) runs without holding the borrow. Pair with [`restore_state`].
pub fn detach_state() -> Option<AppState> {
    STATE.with(|cell| cell.borrow_mut().take())
}

/// Put a detached state back. If shutdown ran in the meantime the state
/// is torn down instead of resurrected.
pub fn restore_state(mut state: AppState) {
    if SHUTTING_DOWN.load(Ordering::SeqCst) {
        teardown(&mut state);
        return;
    }
    STATE.with(|cell| *cell.borrow_mut() = Some(state));
}

fn teardown(state: &mut AppState) {
    state.hotkeys.shutdown();
    let _ = state.bridge.detach();
    info!("shell state torn down");
}

/// Termination path: cancel retries, release every hotkey resource and
/// detach the bridge so late requests resolve `Unavailable`. When the
/// state is currently detached, the flag makes [`restore_state`] finish
/// the teardown.
pub fn shutdown() {
    SHUTTING_DOWN.store(true, Ordering::SeqCst);
    STATE.with(|cell| {
        if let Some(mut state) = cell.borrow_mut().take() {
            teardown(&mut state);
        }
    });
}

static mut TICK_TIMER: id = std::ptr::null_mut();

/// Main entry point for macOS.
pub fn run() {
    autoreleasepool(|| unsafe {
        let app = NSApp();
        // NSApplicationActivationPolicyRegular = 0
        let _: bool = msg_send![app, setActivationPolicy: 0i64];

        let host = host_object();
        ui::main_window::create_main_window(host);
        ui::install_status_bar(host);

        let mut hotkeys = HotkeyManager::new(MacHotkeySystem::new());
        hotkeys.refresh();
        hotkeys.schedule_startup_retries();
        ui::update_status_summary(hotkeys.diagnostics().summary());

        let mut bridge = BridgeDispatcher::new();
        bridge.attach(MacShell);

        STATE.with(|cell| {
            *cell.borrow_mut() = Some(AppState { hotkeys, bridge });
        });

        install_activation_observer();
        install_termination_observer();

        create_tick_timer(host);

        ui::main_window::show();

        info!("entering run loop");
        let _: () = msg_send![app, run];
    });
}

/// ~60fps tick that drains the event bus and bridge queue. Added with
/// CommonModes so it keeps firing while menus are open.
unsafe fn create_tick_timer(target: id) {
    if TICK_TIMER != nil {
        let _: () = msg_send![TICK_TIMER, invalidate];
        TICK_TIMER = nil;
    }
    let timer: id = msg_send![
        get_class("NSTimer"),
        timerWithTimeInterval: 0.016f64,
        target: target,
        selector: objc2::sel!(tickTimerFired:),
        userInfo: nil,
        repeats: YES
    ];
    let run_loop: id = msg_send![get_class("NSRunLoop"), currentRunLoop];
    let common_modes = nsstring_id("kCFRunLoopCommonModes");
    let _: () = msg_send![run_loop, addTimer: timer, forMode: common_modes];

    let _: id = msg_send![timer, retain];
    TICK_TIMER = timer;
}
