//! Team roster bookkeeping.
//!
//! A match splits its players into named teams, each bounded by a player
//! capacity and a spectator capacity. The roster tracks membership only;
//! player state lives in the room's [`PlayerTable`](crate::core::PlayerTable)
//! and is consulted for the active-player queries.
//!
//! Membership invariants:
//! - a player belongs to at most one team at a time
//! - a team holds at most `player_capacity + spectator_capacity` members

mod manager;
mod team;

pub use manager::{RosterError, TeamRoster};
pub use team::{Team, TeamId};
