//! macOS platform layer: wires the pure core to Carbon, NSEvent monitors
//! and AppKit.

pub mod app;
pub mod ffi;
pub mod handlers;
pub mod input;
pub mod ui;

pub use app::run;
