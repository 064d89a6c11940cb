//! Thread-safe staging between the channel endpoint and the main thread.
//!
//! Incoming bridge calls may originate off the UI thread; they are queued
//! here and drained by the main-loop tick, which hands them to the
//! dispatcher. Outgoing events toward the UI runtime (`quickAddSubmitted`)
//! go through a registered sink. Same `OnceLock` pattern as the event bus,
//! initialised lazily because the queue has no paired receiver to create.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::warn;
use serde_json::Value;

use crate::model::constants::EVENT_QUICK_ADD_SUBMITTED;

use super::Responder;

/// One queued bridge call, waiting for the main thread.
pub struct BridgeRequest {
    pub name: String,
    pub argument: Value,
    pub responder: Responder,
}

static QUEUE: OnceLock<Mutex<VecDeque<BridgeRequest>>> = OnceLock::new();

fn queue() -> &'static Mutex<VecDeque<BridgeRequest>> {
    QUEUE.get_or_init(|| Mutex::new(VecDeque::new()))
}

/// Queue a bridge call from any thread.
pub fn enqueue_request(name: impl Into<String>, argument: Value, responder: Responder) {
    let request = BridgeRequest { name: name.into(), argument, responder };
    queue().lock().expect("bridge queue poisoned").push_back(request);
}

/// Pop the next pending call. Main-thread only by convention.
pub fn take_request() -> Option<BridgeRequest> {
    queue().lock().expect("bridge queue poisoned").pop_front()
}

/// Sink for events emitted toward the UI runtime.
pub type EventSink = Box<dyn Fn(&str, Value) + Send>;

static SINK: OnceLock<Mutex<Option<EventSink>>> = OnceLock::new();

fn sink() -> &'static Mutex<Option<EventSink>> {
    SINK.get_or_init(|| Mutex::new(None))
}

/// Register the sink the embedder delivers UI-runtime events through.
/// Replaces any previous sink.
pub fn set_event_sink(event_sink: EventSink) {
    *sink().lock().expect("bridge sink poisoned") = Some(event_sink);
}

/// Emit a named event toward the UI runtime. Dropped with a warning when
/// no sink is registered yet.
pub fn emit_event(name: &str, payload: Value) {
    let guard = sink().lock().expect("bridge sink poisoned");
    match guard.as_ref() {
        Some(event_sink) => event_sink(name, payload),
        None => warn!("dropping {name} event: no UI runtime sink registered"),
    }
}

/// Emit `quickAddSubmitted` with already-normalised text.
pub fn emit_quick_add_submitted(text: &str) {
    emit_event(EVENT_QUICK_ADD_SUBMITTED, Value::String(text.to_string()));
}
