//! Broadcast payloads emitted by rule engines.
//!
//! Only the contents are defined here; framing and delivery belong to the
//! transport collaborator.

use serde::{Deserialize, Serialize};

use crate::core::AccountId;

/// One player's life status at round start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLife {
    /// Owning account.
    pub account_id: AccountId,
    /// Starting hit points for the round.
    pub hp: u32,
}

/// Outbound messages a rule engine may broadcast to its room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMessage {
    /// Round setup: life status for every active player, in team order.
    RoundSetup {
        /// One entry per active player.
        lives: Vec<PlayerLife>,
    },
    /// A timed sub-round ended. Marker only.
    SubRoundEnd,
}
