//! Pure data model: configuration constants and window geometry helpers.
//!
//! Nothing in here touches FFI; the platform layer feeds real screen and
//! frame values into these helpers.

pub mod constants;
pub mod geometry;

pub use constants::*;
pub use geometry::{clamp_content_height, resize_keeping_top, WindowFrame};
