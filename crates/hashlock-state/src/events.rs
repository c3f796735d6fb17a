//! # Event Sink Collaborator
//!
//! The [`EventSink`] trait is the state machine's view of the notification
//! transport. Emission is best-effort by contract: the machine attempts
//! emission as part of a successful transition and does not roll the state
//! write back if the sink fails — state consistency is preferred over
//! notification delivery. Consumers needing stronger guarantees should put
//! an outbox behind this trait rather than change the machine.

use std::sync::Mutex;

use thiserror::Error;

/// Failure reported by an event sink.
#[derive(Error, Debug)]
pub enum EventError {
    /// The transport could not accept the event.
    #[error("event transport failure: {0}")]
    Transport(String),
}

/// Notification transport as seen by the state machine.
pub trait EventSink {
    /// Attempt to emit a named event with a serialized payload.
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError>;
}

/// An event captured by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEvent {
    /// The event name (e.g. `Bob_PROPOSAL_CREATED`).
    pub name: String,
    /// The serialized JSON payload.
    pub payload: Vec<u8>,
}

// ─── RecordingSink ───────────────────────────────────────────────────

/// Captures every emitted event in order.
///
/// This is the bridge to the external relaying agents: a relay or timeout
/// watcher reads the recorded events off one ledger and acts on another.
/// Also the workhorse of the test suites.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EmittedEvent>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event emitted so far, in emission order.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().map(|e| (*e).clone()).unwrap_or_default()
    }

    /// Remove and return every recorded event.
    pub fn drain(&self) -> Vec<EmittedEvent> {
        self.events
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }

    /// Names of the recorded events, in emission order.
    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.name).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| EventError::Transport("recording sink lock poisoned".into()))?;
        events.push(EmittedEvent {
            name: name.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

// ─── NullSink ────────────────────────────────────────────────────────

/// Discards every event. For deployments where no consumer exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _name: &str, _payload: &[u8]) -> Result<(), EventError> {
        Ok(())
    }
}
