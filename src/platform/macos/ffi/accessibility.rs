//! FFI bindings for the TCC Accessibility API.

use super::cocoa::{get_class, id, msg_send};

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    pub fn AXIsProcessTrusted() -> bool;

    pub fn AXIsProcessTrustedWithOptions(options: *const std::ffi::c_void) -> bool;

    pub static kAXTrustedCheckOptionPrompt: *const std::ffi::c_void;
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    pub static kCFBooleanTrue: *const std::ffi::c_void;
}

/// Whether the process currently holds the Accessibility trust grant.
pub fn is_process_trusted() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Trigger the system Accessibility permission prompt.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn prompt_for_accessibility() {
    // kAXTrustedCheckOptionPrompt is a CFString, toll-free bridged to
    // NSString, so NSDictionary can key on it directly.
    let key = kAXTrustedCheckOptionPrompt as id;
    let value = kCFBooleanTrue as id;
    let options: id =
        msg_send![get_class("NSDictionary"), dictionaryWithObject: value, forKey: key];
    let _ = AXIsProcessTrustedWithOptions(options as *const std::ffi::c_void);
}
