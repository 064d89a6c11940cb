//! Thread-safe event bus built on an mpsc channel.
//!
//! Any thread publishes through an [`EventPublisher`]; the main thread
//! drains with [`EventBus::take`] or [`EventBus::drain`]. Plain std, no
//! external dependencies.

use std::sync::mpsc::{self, Receiver, Sender};

use super::types::AppEvent;

/// Multi-producer, single-consumer event bus.
///
/// The single consumer is the main thread's tick; producers (hotkey
/// callbacks, monitors, menu actions) hold cloned publishers.
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A cloneable publisher handle for other threads.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher { sender: self.sender.clone() }
    }

    /// Pop the next pending event without blocking.
    pub fn take(&self) -> Option<AppEvent> {
        self.receiver.try_recv().ok()
    }

    /// Collect every pending event at once.
    pub fn drain(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.take() {
            events.push(event);
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe publisher.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    pub(super) fn from_sender(sender: Sender<AppEvent>) -> Self {
        Self { sender }
    }

    /// Publish an event. Non-blocking; a dropped receiver means the app is
    /// shutting down, so send errors are deliberately ignored.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }
}
