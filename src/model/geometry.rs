//! Main-window resize arithmetic.
//!
//! AppKit window origins are bottom-left, so growing a window downward while
//! keeping its top edge visually fixed means moving the origin down by the
//! height delta. The platform layer converts NSRect values into
//! [`WindowFrame`] and back; the math itself is plain and testable.

use crate::clamp;
use super::constants::{HEIGHT_EPSILON, MIN_CONTENT_HEIGHT, SCREEN_HEIGHT_MARGIN};

/// A window frame in screen coordinates (bottom-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Clamp a requested content height into the allowed range.
///
/// `max_content_height` is derived from the screen's visible frame when one
/// is available ([`max_content_height_for_screen`]), otherwise the caller
/// passes the fallback maximum.
pub fn clamp_content_height(requested: f64, max_content_height: f64) -> f64 {
    let hi = max_content_height.max(MIN_CONTENT_HEIGHT);
    clamp(requested, MIN_CONTENT_HEIGHT, hi)
}

/// Maximum content height for a screen with the given visible-frame height.
pub fn max_content_height_for_screen(visible_height: f64) -> f64 {
    (visible_height - SCREEN_HEIGHT_MARGIN).max(MIN_CONTENT_HEIGHT)
}

/// Compute the new frame for a height change, keeping the top edge fixed.
///
/// Returns `None` when the change is below [`HEIGHT_EPSILON`], meaning the
/// caller should skip the resize entirely.
pub fn resize_keeping_top(current: WindowFrame, target_height: f64) -> Option<WindowFrame> {
    let delta = target_height - current.height;
    if delta.abs() < HEIGHT_EPSILON {
        return None;
    }
    Some(WindowFrame {
        x: current.x,
        y: current.y - delta,
        width: current.width,
        height: target_height,
    })
}
