//! Outbound transport seam.
//!
//! The engine broadcasts through this trait and never waits on it: sends
//! must be non-blocking from the engine's perspective, and failures are the
//! room's problem to log, not the engine's to handle.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::message::GameMessage;

/// Transport-layer failure. Never propagates into engine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The outbound channel is gone.
    #[error("transport is closed")]
    Closed,
}

/// Outbound message sink for a room.
pub trait Transport: Send {
    /// Queue a message for every connected client. Must not block.
    fn broadcast(&self, message: &GameMessage) -> Result<(), TransportError>;
}

/// Transport that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn broadcast(&self, _message: &GameMessage) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Transport that records messages in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// the room another.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    messages: Arc<Mutex<Vec<GameMessage>>>,
}

impl MemoryTransport {
    /// Create an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything broadcast so far.
    #[must_use]
    pub fn messages(&self) -> Vec<GameMessage> {
        self.messages.lock().expect("transport buffer poisoned").clone()
    }

    /// Number of messages broadcast so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().expect("transport buffer poisoned").len()
    }

    /// Whether nothing has been broadcast.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transport for MemoryTransport {
    fn broadcast(&self, message: &GameMessage) -> Result<(), TransportError> {
        self.messages
            .lock()
            .map_err(|_| TransportError::Closed)?
            .push(message.clone());
        Ok(())
    }
}
