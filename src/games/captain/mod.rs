//! Captain mode: two-team round-based elimination.
//!
//! Each round, every active player receives a captain life pool; a team
//! loses the round when it runs out of captains. The mode plays a fixed
//! number of rounds (3 or 5, from the room's score limit) inside the
//! generic Waiting / Playing lifecycle.

mod record;
mod rules;

pub use record::CaptainRecord;
pub use rules::{CaptainRule, ALPHA, BETA, CAPTAIN_RULE_ID};
