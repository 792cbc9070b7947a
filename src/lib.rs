//! # match-rules
//!
//! A generic hierarchical rule engine for multiplayer match servers.
//!
//! ## Design Principles
//!
//! 1. **Generic Lifecycle**: Every mode shares one Waiting -> Playing ->
//!    Result skeleton. Modes inject timing, win checks, and scoring; the
//!    skeleton never changes.
//!
//! 2. **Modes Are Data**: The state hierarchy is parent links, transitions
//!    are a table, mode selection is a registry keyed on the decoded match
//!    descriptor. New modes add states and factories, not type hierarchies.
//!
//! 3. **Rooms Are Isolation Boundaries**: One engine per room, no shared
//!    mutable state, non-blocking ticks, and a fault in one match never
//!    touches another.
//!
//! ## Architecture
//!
//! An external scheduler drives `update(delta)` once per tick on each live
//! match. The engine reads its room (players, roster, options), advances
//! its state machine through guarded transitions, and emits broadcasts
//! through the transport seam. Refused transitions are expected control
//! flow, reported as `false`, never as errors.
//!
//! ## Modules
//!
//! - `core`: match descriptor, player view, engine context
//! - `fsm`: hierarchical state machine (states, substates, guarded
//!   transitions)
//! - `roster`: teams, capacities, membership
//! - `room`: collaborator surface (options, players, master, broadcast)
//! - `rules`: the `GameRule` trait, score records, the mode registry
//! - `driver`: sessions and the multi-room tick driver
//! - `games`: concrete modes (captain)

pub mod core;
pub mod driver;
pub mod fsm;
pub mod games;
pub mod room;
pub mod roster;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{AccountId, EngineContext, MatchKey, Player, PlayerState, PlayerTable, RuleId};

pub use crate::fsm::{Guard, RuleStateMachine, StateConfigurer, StateId, TriggerId};

pub use crate::roster::{RosterError, Team, TeamId, TeamRoster};

pub use crate::room::{
    GameMessage, MemoryTransport, NullTransport, PlayerLife, Room, RoomOptions, Transport,
    TransportError,
};

pub use crate::rules::{GameRule, RecordBase, RuleFactory, RuleRegistry, ScoreRecord};

pub use crate::driver::{MatchDriver, MatchSession, SessionError};
