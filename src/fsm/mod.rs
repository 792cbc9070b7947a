//! Hierarchical rule state machine.
//!
//! The match lifecycle is a tree of states: a `Playing` superstate contains
//! the in-match substates, with `Waiting` as a sibling root. The hierarchy
//! is data (parent links), not a type hierarchy, so game modes add states
//! and transitions without adding types.
//!
//! ## Key Components
//!
//! - [`StateId`] / [`TriggerId`]: opaque identifiers; the well-known rule
//!   states and triggers live in [`state`] and [`trigger`]
//! - [`RuleStateMachine`]: guarded transition table plus the current state
//! - [`Guard`]: side-effect-free predicate evaluated at fire time

mod machine;

pub use machine::{Guard, RuleStateMachine, StateConfigurer, StateId, TriggerId};

/// Well-known rule states shared by game modes.
///
/// Modes pick the subset they use and may define additional states above
/// `RESULT`'s id.
pub mod state {
    use super::StateId;

    /// Lobby: waiting for players and readiness.
    pub const WAITING: StateId = StateId::new(0);
    /// Superstate covering the whole running match.
    pub const PLAYING: StateId = StateId::new(1);
    /// First play phase.
    pub const FIRST_HALF: StateId = StateId::new(2);
    /// Break between halves.
    pub const HALF_TIME: StateId = StateId::new(3);
    /// Second play phase.
    pub const SECOND_HALF: StateId = StateId::new(4);
    /// Transitioning into the result screen.
    pub const ENTERING_RESULT: StateId = StateId::new(5);
    /// Result screen.
    pub const RESULT: StateId = StateId::new(6);
}

/// Well-known triggers shared by game modes.
pub mod trigger {
    use super::TriggerId;

    /// Begin the match from the lobby.
    pub const START_GAME: TriggerId = TriggerId::new(0);
    /// Advance toward (or into) the result screen.
    pub const START_RESULT: TriggerId = TriggerId::new(1);
    /// Leave the result screen and return to the lobby.
    pub const END_GAME: TriggerId = TriggerId::new(2);
    /// Move between halves.
    pub const START_HALF_TIME: TriggerId = TriggerId::new(3);
}
