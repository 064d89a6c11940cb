//! Application events and the bus they travel on.
//!
//! Hotkey callbacks, NSEvent monitors, menu actions and the bridge endpoint
//! all publish [`AppEvent`]s; the main-loop tick drains them and performs
//! the corresponding native action. This keeps every producer free to run
//! on whatever thread the OS calls it on while all UI mutation stays on the
//! main thread.

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{init_event_bus, publish, publisher, take_event};
pub use types::AppEvent;
