//! Carbon-backed implementation of the hotkey OS seam.
//!
//! Owns the raw hotkey refs and the shared event handler ref; the
//! registration state machine in the core drives it and guarantees the
//! acquire/release pairing. Hotkey presses publish to the event bus and
//! are picked up by the main-loop tick.

use std::time::Duration;

use log::debug;

use crate::events::{publish, AppEvent};
use crate::hotkey::{HotkeySystem, KeyCombo, Purpose, RetryTimer};
use crate::model::constants::HOTKEY_SIGNATURE;
use crate::platform::macos::ffi::cocoa::{get_class, id, msg_send, nil, RcBlock, NO};
use crate::platform::macos::ffi::{
    is_process_trusted, prompt_for_accessibility, EventHandlerCallRef, EventHandlerRef,
    EventHotKeyID, EventHotKeyRef, EventRef, EventTypeSpec, GetApplicationEventTarget,
    GetEventClass, GetEventKind, GetEventParameter, InstallEventHandler, RegisterEventHotKey,
    RemoveEventHandler, UnregisterEventHotKey, K_EVENT_CLASS_KEYBOARD, K_EVENT_HOTKEY_PRESSED,
    K_EVENT_PARAM_DIRECT_OBJECT, NO_ERR, PARAM_ERR, TYPE_EVENT_HOTKEY_ID,
};

use super::monitors;

/// A scheduled retry backed by a one-shot NSTimer.
pub struct NsRetryTimer {
    timer: id,
}

impl RetryTimer for NsRetryTimer {
    fn cancel(&mut self) {
        unsafe {
            if self.timer != nil {
                let _: () = msg_send![self.timer, invalidate];
                self.timer = nil;
            }
        }
    }
}

/// The real OS seam: Carbon hotkeys, the shared handler, the NSEvent
/// monitor pair and NSTimer retries.
///
/// Main-thread only, like all AppKit state.
pub struct MacHotkeySystem {
    hotkey_refs: [EventHotKeyRef; 2],
    handler_ref: EventHandlerRef,
}

impl MacHotkeySystem {
    pub fn new() -> Self {
        Self {
            hotkey_refs: [std::ptr::null_mut(); 2],
            handler_ref: std::ptr::null_mut(),
        }
    }
}

impl Default for MacHotkeySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeySystem for MacHotkeySystem {
    type Timer = NsRetryTimer;

    fn register(&mut self, purpose: Purpose, combo: KeyCombo) -> i32 {
        let hk_id = EventHotKeyID {
            signature: HOTKEY_SIGNATURE,
            id: purpose.hotkey_id(),
        };
        let mut out_ref: EventHotKeyRef = std::ptr::null_mut();
        let status = unsafe {
            RegisterEventHotKey(
                combo.key_code as u32,
                combo.carbon_modifiers,
                hk_id,
                GetApplicationEventTarget(),
                0,
                &mut out_ref,
            )
        };
        if status != NO_ERR {
            return status;
        }
        if out_ref.is_null() {
            return PARAM_ERR;
        }
        self.hotkey_refs[purpose.index()] = out_ref;
        NO_ERR
    }

    fn unregister(&mut self, purpose: Purpose) {
        let slot = &mut self.hotkey_refs[purpose.index()];
        if !slot.is_null() {
            unsafe {
                let _ = UnregisterEventHotKey(*slot);
            }
            *slot = std::ptr::null_mut();
        }
    }

    fn install_shared_handler(&mut self) -> bool {
        let types = [EventTypeSpec {
            event_class: K_EVENT_CLASS_KEYBOARD,
            event_kind: K_EVENT_HOTKEY_PRESSED,
        }];
        let mut handler_ref: EventHandlerRef = std::ptr::null_mut();
        let status = unsafe {
            InstallEventHandler(
                GetApplicationEventTarget(),
                hotkey_event_handler,
                types.len() as u32,
                types.as_ptr(),
                std::ptr::null_mut(),
                &mut handler_ref,
            )
        };
        if status != NO_ERR || handler_ref.is_null() {
            debug!("InstallEventHandler failed: {status}");
            return false;
        }
        self.handler_ref = handler_ref;
        true
    }

    fn remove_shared_handler(&mut self) {
        if !self.handler_ref.is_null() {
            unsafe {
                let _ = RemoveEventHandler(self.handler_ref);
            }
            self.handler_ref = std::ptr::null_mut();
        }
    }

    fn install_fallback_monitors(&mut self) -> bool {
        unsafe { monitors::install_fallback_monitors() }
    }

    fn remove_fallback_monitors(&mut self) {
        unsafe { monitors::remove_fallback_monitors() }
    }

    fn set_fallback_active(&mut self, purpose: Purpose, active: bool) {
        monitors::set_fallback_gate(purpose, active);
    }

    fn is_trusted(&self) -> bool {
        is_process_trusted()
    }

    fn prompt_for_permission(&mut self) {
        unsafe {
            prompt_for_accessibility();
        }
    }

    fn schedule_retry(&mut self, delay: Duration) -> NsRetryTimer {
        // One-shot block timer; fires a retry opportunity on the run loop.
        let block = RcBlock::new(move |_timer: id| {
            publish(AppEvent::RetryHotkeys);
        });
        let timer: id = unsafe {
            msg_send![
                get_class("NSTimer"),
                scheduledTimerWithTimeInterval: delay.as_secs_f64(),
                repeats: NO,
                block: &*block
            ]
        };
        NsRetryTimer { timer }
    }
}

/// Shared Carbon handler for hotkey-pressed events.
///
/// Called by the Carbon runtime; must not panic. Publishes the trigger
/// event for the matching purpose to the bus.
pub extern "C" fn hotkey_event_handler(
    _call_ref: EventHandlerCallRef,
    event: EventRef,
    _user_data: *mut std::ffi::c_void,
) -> i32 {
    unsafe {
        if GetEventClass(event) == K_EVENT_CLASS_KEYBOARD
            && GetEventKind(event) == K_EVENT_HOTKEY_PRESSED
        {
            let mut hot_id = EventHotKeyID { signature: 0, id: 0 };
            let status = GetEventParameter(
                event,
                K_EVENT_PARAM_DIRECT_OBJECT,
                TYPE_EVENT_HOTKEY_ID,
                std::ptr::null_mut(),
                std::mem::size_of::<EventHotKeyID>() as u32,
                std::ptr::null_mut(),
                &mut hot_id as *mut _ as *mut std::ffi::c_void,
            );
            if status == NO_ERR && hot_id.signature == HOTKEY_SIGNATURE {
                if let Some(purpose) = Purpose::from_hotkey_id(hot_id.id) {
                    publish(AppEvent::for_purpose(purpose));
                }
            }
        }
        NO_ERR
    }
}
