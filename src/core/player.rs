//! Player view consumed by the rule engine.
//!
//! The engine does not own sessions or connections. It sees players through
//! the room: an account identifier, an in-room state, a ready flag, and a
//! developer flag (the test bypass that relaxes minimum-player guards).

use serde::{Deserialize, Serialize};

/// Account identifier for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Create a new account ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Account({})", self.0)
    }
}

/// In-room state of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// In the room but not part of the running match.
    #[default]
    Lobby,
    /// Queued to enter play at the next opportunity.
    Waiting,
    /// Taking part in the running match.
    Playing,
    /// Alive inside a round.
    Alive,
    /// Eliminated inside a round.
    Dead,
    /// Watching from an observer slot.
    Spectating,
}

impl PlayerState {
    /// Whether the player counts toward active play.
    ///
    /// Everything except the lobby and observer slots is active: a dead
    /// player is still part of the round.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, PlayerState::Lobby | PlayerState::Spectating)
    }
}

/// A player as seen from inside a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Owning account.
    pub account_id: AccountId,
    /// Current in-room state.
    pub state: PlayerState,
    /// Ready flag set from the lobby.
    pub is_ready: bool,
    /// Developer/test bypass: relaxes minimum-player guards.
    pub is_developer: bool,
}

impl Player {
    /// Create a player in the lobby, not ready.
    #[must_use]
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            state: PlayerState::default(),
            is_ready: false,
            is_developer: false,
        }
    }

    /// Set the in-room state.
    #[must_use]
    pub fn with_state(mut self, state: PlayerState) -> Self {
        self.state = state;
        self
    }

    /// Mark the player ready.
    #[must_use]
    pub fn ready(mut self) -> Self {
        self.is_ready = true;
        self
    }

    /// Mark the player as a developer (test bypass).
    #[must_use]
    pub fn developer(mut self) -> Self {
        self.is_developer = true;
        self
    }

    /// Whether the player counts toward active play.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// Players in a room, in join order.
///
/// Rooms hold at most a dozen players, so lookups are linear scans over the
/// join-ordered list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTable {
    players: Vec<Player>,
}

impl PlayerTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player at the end of the join order.
    ///
    /// Returns false (and leaves the table unchanged) if the account is
    /// already present.
    pub fn insert(&mut self, player: Player) -> bool {
        if self.contains(player.account_id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Remove a player, preserving the join order of the rest.
    pub fn remove(&mut self, account_id: AccountId) -> Option<Player> {
        let pos = self.players.iter().position(|p| p.account_id == account_id)?;
        Some(self.players.remove(pos))
    }

    /// Look up a player by account.
    #[must_use]
    pub fn get(&self, account_id: AccountId) -> Option<&Player> {
        self.players.iter().find(|p| p.account_id == account_id)
    }

    /// Look up a player mutably by account.
    pub fn get_mut(&mut self, account_id: AccountId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.account_id == account_id)
    }

    /// Check whether an account is present.
    #[must_use]
    pub fn contains(&self, account_id: AccountId) -> bool {
        self.get(account_id).is_some()
    }

    /// Iterate players in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Number of players in the room.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
