//! Thin Cocoa helpers over the `objc2` ecosystem.
//!
//! Dynamic `id`-based messaging is used throughout the platform layer;
//! these aliases and helpers keep the call sites short.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

pub use objc2::runtime::{AnyClass, AnyObject, Bool, Sel};
pub use objc2::{class, msg_send, sel};

pub use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

pub use block2::RcBlock;

use objc2::rc::Retained;
use objc2_app_kit::NSApplication;

/// Objective-C object pointer.
pub type id = *mut AnyObject;

/// Null object pointer.
pub const nil: id = std::ptr::null_mut();

pub const YES: Bool = Bool::YES;
pub const NO: Bool = Bool::NO;

/// The shared NSApplication instance.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![NSApplication::class(), sharedApplication] }
}

/// Create an NSString and return it as a raw retained pointer.
#[inline]
pub fn nsstring_id(s: &str) -> id {
    let ns = NSString::from_str(s);
    Retained::into_raw(ns) as id
}

/// Look up a class by name, panicking if not found.
#[inline]
pub fn get_class(name: &str) -> &'static AnyClass {
    let c_name = std::ffi::CString::new(name).expect("invalid class name");
    AnyClass::get(&c_name).unwrap_or_else(|| panic!("class '{}' not found", name))
}

/// Copy an NSString's contents into a Rust `String`. Null becomes empty.
///
/// # Safety
/// `s` must be nil or a valid NSString.
pub unsafe fn nsstring_to_string(s: id) -> String {
    if s == nil {
        return String::new();
    }
    let ptr: *const std::os::raw::c_char = msg_send![s, UTF8String];
    if ptr.is_null() {
        return String::new();
    }
    std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Run a closure inside an autorelease pool.
#[inline]
pub fn autoreleasepool<R, F: FnOnce() -> R>(f: F) -> R {
    unsafe {
        let pool: id = msg_send![get_class("NSAutoreleasePool"), new];
        let result = f();
        let _: () = msg_send![pool, drain];
        result
    }
}
