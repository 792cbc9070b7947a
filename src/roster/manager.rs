//! Roster: team registry plus membership queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::team::{Team, TeamId};
use crate::core::{AccountId, Player, PlayerTable};

/// Recoverable membership errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The target team is not registered.
    #[error("team {0} is not registered")]
    UnknownTeam(TeamId),
    /// The target team has no free slot.
    #[error("team {0} is full")]
    TeamFull(TeamId),
    /// The player already belongs to a team.
    #[error("player {0} already belongs to {1}")]
    AlreadyMember(AccountId, TeamId),
}

/// Mapping from team identifier to team.
///
/// Teams are ordered by id so that iteration (and everything built from it,
/// like broadcast payloads) is deterministic. The roster is owned by one
/// match engine for the match's lifetime; it is created by the engine's
/// `initialize` and torn down by `cleanup`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    teams: BTreeMap<TeamId, Team>,
}

impl TeamRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team.
    ///
    /// Panics if the id is already registered - team setup is engine
    /// initialization code, and a duplicate is a programmer error.
    pub fn add_team(&mut self, id: TeamId, player_capacity: u32, spectator_capacity: u32) {
        if self.teams.contains_key(&id) {
            panic!("team {id} already registered");
        }
        debug!(team = %id, player_capacity, spectator_capacity, "team added");
        self.teams.insert(id, Team::new(player_capacity, spectator_capacity));
    }

    /// Remove a team and its memberships.
    pub fn remove_team(&mut self, id: TeamId) -> Option<Team> {
        let team = self.teams.remove(&id);
        if team.is_some() {
            debug!(team = %id, "team removed");
        }
        team
    }

    /// Remove every team.
    pub fn clear(&mut self) {
        self.teams.clear();
    }

    /// Look up a team.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    /// Iterate teams in id order.
    pub fn teams(&self) -> impl Iterator<Item = (TeamId, &Team)> {
        self.teams.iter().map(|(id, team)| (*id, team))
    }

    /// Number of teams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether no teams are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// The team an account belongs to, if any.
    #[must_use]
    pub fn team_of(&self, account_id: AccountId) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|(_, team)| team.contains(account_id))
            .map(|(id, _)| *id)
    }

    /// Put a player on a team.
    ///
    /// Enforces the membership invariants: one team per player, and no more
    /// members than the team has slots.
    pub fn join(&mut self, id: TeamId, account_id: AccountId) -> Result<(), RosterError> {
        if let Some(current) = self.team_of(account_id) {
            return Err(RosterError::AlreadyMember(account_id, current));
        }
        let team = self.teams.get_mut(&id).ok_or(RosterError::UnknownTeam(id))?;
        if team.is_full() {
            return Err(RosterError::TeamFull(id));
        }
        team.push(account_id);
        Ok(())
    }

    /// Take a player off whichever team holds them.
    pub fn leave(&mut self, account_id: AccountId) -> Option<TeamId> {
        let id = self.team_of(account_id)?;
        self.teams
            .get_mut(&id)
            .expect("team_of returned a registered team")
            .remove(account_id);
        Some(id)
    }

    /// Players on any team whose state counts as active play
    /// (neither in the lobby nor spectating), in team then join order.
    pub fn players_active<'a>(
        &'a self,
        players: &'a PlayerTable,
    ) -> impl Iterator<Item = &'a Player> + 'a {
        self.teams
            .values()
            .flat_map(move |team| {
                team.members()
                    .iter()
                    .filter_map(move |&id| players.get(id))
            })
            .filter(|plr| plr.is_active())
    }

    /// The smallest active-player count over all teams.
    ///
    /// An empty roster yields 0 (degenerate but defined).
    #[must_use]
    pub fn min_active_across_teams(&self, players: &PlayerTable) -> usize {
        self.teams
            .values()
            .map(|team| {
                team.members()
                    .iter()
                    .filter_map(|&id| players.get(id))
                    .filter(|plr| plr.is_active())
                    .count()
            })
            .min()
            .unwrap_or(0)
    }
}
