//! Room collaborator surface.
//!
//! The engine does not implement transport, sessions, or persistence. It
//! consumes a [`Room`]: match options, the join-ordered player table, the
//! team roster, the master designation, and a fire-and-forget broadcast
//! channel. One engine instance owns one room's state for the match's
//! lifetime; all mutation goes through that single owner.

mod message;
mod transport;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AccountId, MatchKey, Player, PlayerTable};
use crate::roster::TeamRoster;

pub use message::{GameMessage, PlayerLife};
pub use transport::{MemoryTransport, NullTransport, Transport, TransportError};

/// Match options fixed at room creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOptions {
    /// Packed match descriptor (mode, map, capacities, visibility).
    pub match_key: MatchKey,
    /// Score limit; modes derive their round count from it.
    pub score_limit: u32,
    /// Duration of one round.
    pub time_limit: Duration,
}

impl RoomOptions {
    /// Options with the default score limit (5) and round time (3 minutes).
    #[must_use]
    pub fn new(match_key: MatchKey) -> Self {
        Self {
            match_key,
            score_limit: 5,
            time_limit: Duration::from_secs(180),
        }
    }

    /// Set the score limit.
    #[must_use]
    pub fn with_score_limit(mut self, score_limit: u32) -> Self {
        self.score_limit = score_limit;
        self
    }

    /// Set the round duration.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

/// One match room: the state a rule engine operates on.
pub struct Room {
    options: RoomOptions,
    players: PlayerTable,
    roster: TeamRoster,
    master: Option<AccountId>,
    transport: Box<dyn Transport>,
}

impl Room {
    /// Create a room with the given options and outbound transport.
    #[must_use]
    pub fn new(options: RoomOptions, transport: Box<dyn Transport>) -> Self {
        Self {
            options,
            players: PlayerTable::new(),
            roster: TeamRoster::new(),
            master: None,
            transport,
        }
    }

    /// Match options.
    #[must_use]
    pub fn options(&self) -> &RoomOptions {
        &self.options
    }

    /// Players in join order.
    #[must_use]
    pub fn players(&self) -> &PlayerTable {
        &self.players
    }

    /// Team roster.
    #[must_use]
    pub fn roster(&self) -> &TeamRoster {
        &self.roster
    }

    /// Mutable team roster; engine initialize/cleanup goes through this.
    pub fn roster_mut(&mut self) -> &mut TeamRoster {
        &mut self.roster
    }

    /// Look up a player.
    #[must_use]
    pub fn player(&self, account_id: AccountId) -> Option<&Player> {
        self.players.get(account_id)
    }

    /// Look up a player mutably.
    pub fn player_mut(&mut self, account_id: AccountId) -> Option<&mut Player> {
        self.players.get_mut(account_id)
    }

    /// Add a player to the room. The first player becomes master.
    ///
    /// Returns false if the account is already present.
    pub fn add_player(&mut self, player: Player) -> bool {
        let account_id = player.account_id;
        if !self.players.insert(player) {
            return false;
        }
        if self.master.is_none() {
            self.master = Some(account_id);
        }
        debug!(player = %account_id, "player joined room");
        true
    }

    /// Remove a player from the room, the roster, and (if applicable) the
    /// master designation.
    pub fn remove_player(&mut self, account_id: AccountId) -> Option<Player> {
        let player = self.players.remove(account_id)?;
        self.roster.leave(account_id);
        if self.master == Some(account_id) {
            self.master = self.players.iter().next().map(|p| p.account_id);
        }
        debug!(player = %account_id, "player left room");
        Some(player)
    }

    /// The room's designated master, if any.
    #[must_use]
    pub fn master(&self) -> Option<AccountId> {
        self.master
    }

    /// Designate a master. The account must be in the room.
    pub fn set_master(&mut self, account_id: AccountId) -> bool {
        if !self.players.contains(account_id) {
            return false;
        }
        self.master = Some(account_id);
        true
    }

    /// Whether `account_id` is the designated master.
    #[must_use]
    pub fn is_master(&self, account_id: AccountId) -> bool {
        self.master == Some(account_id)
    }

    /// Whether any player in the room carries the developer bypass.
    #[must_use]
    pub fn has_developer(&self) -> bool {
        self.players.iter().any(|p| p.is_developer)
    }

    /// Broadcast a message to the room.
    ///
    /// Fire-and-forget: a transport failure is logged and dropped, never
    /// surfaced into engine logic.
    pub fn broadcast(&self, message: GameMessage) {
        if let Err(err) = self.transport.broadcast(&message) {
            warn!(%err, "broadcast dropped");
        }
    }
}
