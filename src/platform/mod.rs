//! Platform-specific implementations. Only macOS is supported.

pub mod macos;

pub use macos::run;
