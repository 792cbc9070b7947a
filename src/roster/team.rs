//! A single team: ordered members plus capacity bounds.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::AccountId;

/// Team identifier. Modes define what teams exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team({})", self.0)
    }
}

/// A named team within a match.
///
/// Members are kept in join order; broadcast payloads built from the roster
/// walk this order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    members: SmallVec<[AccountId; 8]>,
    player_capacity: u32,
    spectator_capacity: u32,
}

impl Team {
    /// Create an empty team with the given capacities.
    ///
    /// A zero player capacity is valid (degenerate match configuration);
    /// such a team simply never accepts members.
    #[must_use]
    pub fn new(player_capacity: u32, spectator_capacity: u32) -> Self {
        Self {
            members: SmallVec::new(),
            player_capacity,
            spectator_capacity,
        }
    }

    /// Player slots.
    #[must_use]
    pub fn player_capacity(&self) -> u32 {
        self.player_capacity
    }

    /// Spectator slots.
    #[must_use]
    pub fn spectator_capacity(&self) -> u32 {
        self.spectator_capacity
    }

    /// Total slots.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.player_capacity + self.spectator_capacity
    }

    /// Members in join order.
    #[must_use]
    pub fn members(&self) -> &[AccountId] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the team has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether every slot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.members.len() as u32 >= self.capacity()
    }

    /// Whether an account is on this team.
    #[must_use]
    pub fn contains(&self, account_id: AccountId) -> bool {
        self.members.contains(&account_id)
    }

    pub(crate) fn push(&mut self, account_id: AccountId) {
        self.members.push(account_id);
    }

    pub(crate) fn remove(&mut self, account_id: AccountId) -> bool {
        if let Some(pos) = self.members.iter().position(|&m| m == account_id) {
            self.members.remove(pos);
            true
        } else {
            false
        }
    }
}
