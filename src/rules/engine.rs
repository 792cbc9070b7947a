//! Rule engine trait for game-mode implementations.
//!
//! A mode defines:
//! - how the roster is populated and torn down
//! - what happens on each scheduler tick
//! - how per-player results are accumulated

use std::time::Duration;

use super::record::ScoreRecord;
use crate::core::{Player, RuleId};
use crate::fsm::{StateId, TriggerId};
use crate::room::Room;

/// One game mode's rule engine, bound to one room for one match.
///
/// The hosting scheduler drives [`update`](Self::update) once per tick.
/// `update` must complete promptly without blocking: one shared scheduler
/// services many rooms.
///
/// ## Implementation Notes
///
/// - `initialize` / `cleanup` run exactly once, at match creation and
///   teardown
/// - `fire` returning false is expected control flow (refused transition);
///   callers proceed normally on the next tick
/// - `update` must not assume nonzero team capacities: a degenerate match
///   configuration sizes every team at zero
pub trait GameRule {
    /// The rule selector this engine implements.
    fn rule_id(&self) -> RuleId;

    /// Populate the roster from the room's match configuration.
    fn initialize(&mut self, room: &mut Room);

    /// Tear the roster down.
    fn cleanup(&mut self, room: &mut Room);

    /// Advance the match by one tick of logical time.
    fn update(&mut self, room: &mut Room, delta: Duration);

    /// Fresh scoring accumulator for a player.
    fn player_record(&self, player: &Player) -> Box<dyn ScoreRecord>;

    /// Offer a trigger to the mode's state machine.
    fn fire(&mut self, trigger: TriggerId, room: &Room) -> bool;

    /// Whether the machine is in `state`, directly or via an ancestor.
    fn is_in_state(&self, state: StateId) -> bool;

    /// The machine's current (leaf) state.
    fn current_state(&self) -> StateId;
}
