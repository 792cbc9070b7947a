//! Core types: match descriptor, players, the engine context.
//!
//! These are the mode-agnostic building blocks; game modes configure
//! everything else through the registry and the state machine.

mod context;
mod match_key;
mod player;

pub use context::EngineContext;
pub use match_key::{MatchKey, RuleId};
pub use player::{AccountId, Player, PlayerState, PlayerTable};
