//! Match hosting: sessions and the tick driver.
//!
//! One [`MatchSession`] pairs a room with the rule engine its descriptor
//! selects. A [`MatchDriver`] ticks many sessions from one scheduler; each
//! session is its own serialization boundary, and a fault inside one
//! session's tick is caught, logged, and quarantines that session only.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use thiserror::Error;
use tracing::error;

use crate::core::{EngineContext, RuleId};
use crate::fsm::{StateId, TriggerId};
use crate::room::{Room, RoomOptions, Transport};
use crate::rules::GameRule;

/// Session construction failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The match descriptor selects a mode nobody registered.
    #[error("no rule registered for {0}")]
    UnknownRule(RuleId),
}

/// One live match: a room plus its rule engine.
pub struct MatchSession {
    room: Room,
    rule: Box<dyn GameRule>,
    faulted: bool,
}

impl MatchSession {
    /// Create and initialize a session.
    ///
    /// The engine is selected by the descriptor's rule id and its
    /// `initialize` runs before the session is returned.
    pub fn new(
        context: &EngineContext,
        options: RoomOptions,
        transport: Box<dyn Transport>,
    ) -> Result<Self, SessionError> {
        let mut room = Room::new(options, transport);
        let rule_id = room.options().match_key.rule();
        let mut rule = context
            .create_rule(&room)
            .ok_or(SessionError::UnknownRule(rule_id))?;
        rule.initialize(&mut room);

        Ok(Self {
            room,
            rule,
            faulted: false,
        })
    }

    /// The session's room.
    #[must_use]
    pub fn room(&self) -> &Room {
        &self.room
    }

    /// Mutable room access for the owning host (joins, states, master).
    pub fn room_mut(&mut self) -> &mut Room {
        &mut self.room
    }

    /// The session's rule engine.
    #[must_use]
    pub fn rule(&self) -> &dyn GameRule {
        self.rule.as_ref()
    }

    /// Whether a fault quarantined this session.
    #[must_use]
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Offer a trigger to the session's state machine.
    pub fn fire(&mut self, trigger: TriggerId) -> bool {
        self.rule.fire(trigger, &self.room)
    }

    /// Whether the session's machine is in `state`.
    #[must_use]
    pub fn is_in_state(&self, state: StateId) -> bool {
        self.rule.is_in_state(state)
    }

    /// Advance the match by one tick.
    ///
    /// A panic inside the engine is caught here: the session is marked
    /// faulted and skipped from then on, and nothing propagates to the
    /// caller or to other sessions.
    pub fn tick(&mut self, delta: Duration) {
        if self.faulted {
            return;
        }

        let Self { room, rule, .. } = self;
        let outcome = catch_unwind(AssertUnwindSafe(|| rule.update(room, delta)));
        if outcome.is_err() {
            // Engine state may be torn mid-update; quarantine the session.
            self.faulted = true;
            error!("match tick panicked; session quarantined");
        }
    }

    /// Tear the match down, releasing the room.
    pub fn close(mut self) -> Room {
        self.rule.cleanup(&mut self.room);
        self.room
    }
}

/// Ticks a set of sessions at a fixed cadence.
///
/// Sessions share no mutable state; a slow or faulted session must never
/// delay the others, so `tick_all` does no waiting of any kind.
#[derive(Default)]
pub struct MatchDriver {
    sessions: Vec<MatchSession>,
}

impl MatchDriver {
    /// Create an empty driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a session; returns its index.
    pub fn add(&mut self, session: MatchSession) -> usize {
        self.sessions.push(session);
        self.sessions.len() - 1
    }

    /// Look up a session.
    #[must_use]
    pub fn session(&self, index: usize) -> Option<&MatchSession> {
        self.sessions.get(index)
    }

    /// Look up a session mutably.
    pub fn session_mut(&mut self, index: usize) -> Option<&mut MatchSession> {
        self.sessions.get_mut(index)
    }

    /// Number of hosted sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are hosted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Tick every live session.
    pub fn tick_all(&mut self, delta: Duration) {
        for session in &mut self.sessions {
            session.tick(delta);
        }
    }

    /// Drop quarantined sessions; returns how many were removed.
    pub fn prune_faulted(&mut self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|s| !s.faulted);
        before - self.sessions.len()
    }
}
