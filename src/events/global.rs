//! Global access to the application event bus.
//!
//! FFI callbacks (Carbon hotkey handler, NSEvent monitor blocks, menu
//! actions) have nowhere to thread a bus handle through, so the bus is
//! initialised once at startup and reached through these functions.
//!
//! The sender is `Send + Sync` and lives in a `OnceLock`; the receiver is
//! only touched from the main thread and sits behind a `Mutex` purely to
//! satisfy `Sync`.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock};

use super::bus::EventPublisher;
use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();
static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Initialise the global event bus. Must be called exactly once at startup,
/// before anything publishes.
///
/// # Panics
///
/// Panics if called a second time.
pub fn init_event_bus() {
    let (sender, receiver) = mpsc::channel();
    SENDER.set(sender).expect("event bus already initialized");
    RECEIVER
        .set(Mutex::new(receiver))
        .expect("event bus already initialized");
}

/// A publisher handle backed by the global bus.
///
/// # Panics
///
/// Panics if [`init_event_bus`] has not been called.
pub fn publisher() -> EventPublisher {
    let sender = SENDER.get().expect("event bus not initialized");
    EventPublisher::from_sender(sender.clone())
}

/// Publish a single event to the global bus.
///
/// # Panics
///
/// Panics if [`init_event_bus`] has not been called.
pub fn publish(event: AppEvent) {
    let sender = SENDER.get().expect("event bus not initialized");
    // Receiver dropped means shutdown; ignore.
    let _ = sender.send(event);
}

/// Pop the next pending event, if any. Main-thread only by convention.
///
/// # Panics
///
/// Panics if [`init_event_bus`] has not been called.
pub fn take_event() -> Option<AppEvent> {
    let receiver = RECEIVER.get().expect("event bus not initialized");
    let receiver = receiver.lock().expect("event bus receiver poisoned");
    receiver.try_recv().ok()
}

// The global accessors are thin wrappers over the same mpsc machinery that
// bus.rs tests cover; OnceLock can only be set once per process, so the
// initialisation path is exercised by the integration of the app itself.
