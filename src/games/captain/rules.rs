//! Captain mode lifecycle.

use std::time::Duration;

use tracing::debug;

use super::record::CaptainRecord;
use crate::core::{Player, RuleId};
use crate::fsm::{state, trigger, RuleStateMachine, StateId, TriggerId};
use crate::room::{GameMessage, PlayerLife, Room};
use crate::roster::TeamId;
use crate::rules::{GameRule, ScoreRecord};

/// Rule selector for captain mode (low nibble of the match descriptor).
pub const CAPTAIN_RULE_ID: RuleId = RuleId::new(5);

/// First team.
pub const ALPHA: TeamId = TeamId::new(0);
/// Second team.
pub const BETA: TeamId = TeamId::new(1);

/// Life pool every active player starts a round with.
const STARTING_HP: u32 = 1000;

/// Captain mode engine.
///
/// The round timer accumulates logical tick deltas, never wall-clock time;
/// a reset discards any remainder.
pub struct CaptainRule {
    machine: RuleStateMachine<Room>,
    round_time: Duration,
    round_just_started: bool,
    rounds_total: u32,
    rounds_played: u32,
}

impl CaptainRule {
    /// Create the engine for a room.
    ///
    /// The round count comes from the room's score limit: a limit of 3
    /// plays 3 rounds, anything else plays 5.
    #[must_use]
    pub fn new(room: &Room) -> Self {
        let rounds_total = if room.options().score_limit == 3 { 3 } else { 5 };

        let mut machine = RuleStateMachine::new(state::WAITING);
        machine
            .configure(state::WAITING)
            .permit_if(trigger::START_GAME, state::FIRST_HALF, can_start_game);
        machine
            .configure(state::FIRST_HALF)
            .substate_of(state::PLAYING)
            .permit(trigger::START_RESULT, state::ENTERING_RESULT);
        machine
            .configure(state::ENTERING_RESULT)
            .substate_of(state::PLAYING)
            .permit(trigger::START_RESULT, state::RESULT);
        machine
            .configure(state::RESULT)
            .substate_of(state::PLAYING)
            .permit(trigger::END_GAME, state::WAITING);

        Self {
            machine,
            round_time: Duration::ZERO,
            round_just_started: true,
            rounds_total,
            rounds_played: 0,
        }
    }

    /// Rounds this match will play.
    #[must_use]
    pub fn rounds_total(&self) -> u32 {
        self.rounds_total
    }

    /// Rounds decided so far.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Record a decided round.
    ///
    /// Called by the hosting score logic when a round has a winner. Counts
    /// the round and arms the next round's setup broadcast; once the count
    /// reaches the round total, the next qualifying update moves the match
    /// toward the result.
    pub fn complete_round(&mut self) {
        self.rounds_played += 1;
        self.round_just_started = true;
        self.round_time = Duration::ZERO;
        debug!(
            rounds_played = self.rounds_played,
            rounds_total = self.rounds_total,
            "round completed"
        );
    }

    fn in_live_play(&self) -> bool {
        self.machine.is_in_state(state::PLAYING)
            && !self.machine.is_in_state(state::ENTERING_RESULT)
            && !self.machine.is_in_state(state::RESULT)
    }

    fn broadcast_round_setup(&self, room: &Room) {
        let lives: Vec<PlayerLife> = room
            .roster()
            .players_active(room.players())
            .map(|plr| PlayerLife {
                account_id: plr.account_id,
                hp: STARTING_HP,
            })
            .collect();
        room.broadcast(GameMessage::RoundSetup { lives });
    }
}

impl GameRule for CaptainRule {
    fn rule_id(&self) -> RuleId {
        CAPTAIN_RULE_ID
    }

    fn initialize(&mut self, room: &mut Room) {
        let key = room.options().match_key;
        let player_half = key.player_limit() / 2;
        let spectator_half = key.spectator_limit() / 2;

        let roster = room.roster_mut();
        roster.add_team(ALPHA, player_half, spectator_half);
        roster.add_team(BETA, player_half, spectator_half);
    }

    fn cleanup(&mut self, room: &mut Room) {
        let roster = room.roster_mut();
        roster.remove_team(ALPHA);
        roster.remove_team(BETA);
    }

    fn update(&mut self, room: &mut Room, delta: Duration) {
        self.round_time += delta;

        if !self.in_live_play() {
            return;
        }

        if self.round_just_started {
            // Exactly once per round.
            self.broadcast_round_setup(room);
            self.round_just_started = false;
        } else if self.machine.is_in_state(state::FIRST_HALF) {
            // Still enough players on both sides?
            let min_active = room.roster().min_active_across_teams(room.players());
            if min_active == 0 && !room.has_developer() {
                self.machine.fire(trigger::START_RESULT, room);
            }

            // Round limit reached?
            if self.rounds_played == self.rounds_total {
                self.machine.fire(trigger::START_RESULT, room);
            }

            // Sub-round announcement only: the timer resets without
            // advancing the state machine or the round counter.
            if self.round_time >= room.options().time_limit {
                self.round_time = Duration::ZERO;
                room.broadcast(GameMessage::SubRoundEnd);
            }
        }
    }

    fn player_record(&self, player: &Player) -> Box<dyn ScoreRecord> {
        Box::new(CaptainRecord::new(player.account_id))
    }

    fn fire(&mut self, trigger: TriggerId, room: &Room) -> bool {
        self.machine.fire(trigger, room)
    }

    fn is_in_state(&self, state: StateId) -> bool {
        self.machine.is_in_state(state)
    }

    fn current_state(&self) -> StateId {
        self.machine.current_state()
    }
}

/// Start guard: evaluated when `StartGame` is offered from `Waiting` (the
/// only state the trigger is registered on).
///
/// The match may start when every team has at least one player and every
/// team has a ready player (the master counts as ready). A developer in
/// the room bypasses both checks.
fn can_start_game(room: &Room) -> bool {
    let bypass = room.has_developer();

    if !bypass && room.roster().teams().any(|(_, team)| team.is_empty()) {
        return false;
    }

    bypass
        || room.roster().teams().all(|(_, team)| {
            team.members()
                .iter()
                .filter_map(|&id| room.player(id))
                .any(|plr| plr.is_ready || room.is_master(plr.account_id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AccountId, MatchKey, PlayerState};
    use crate::room::{MemoryTransport, NullTransport, RoomOptions, Transport};

    // capacity code 6 -> 8 players, observers enabled -> 4 spectators
    fn captain_key() -> MatchKey {
        MatchKey::from_raw(u32::from_le_bytes([CAPTAIN_RULE_ID.raw() << 4, 1, 6, 0b10]))
    }

    fn room_with(transport: Box<dyn Transport>) -> Room {
        Room::new(RoomOptions::new(captain_key()), transport)
    }

    fn seat(room: &mut Room, team: TeamId, id: u64, state: PlayerState, ready: bool) {
        let mut plr = Player::new(AccountId::new(id)).with_state(state);
        plr.is_ready = ready;
        room.add_player(plr);
        room.roster_mut().join(team, AccountId::new(id)).unwrap();
    }

    fn started_match(transport: Box<dyn Transport>) -> (CaptainRule, Room) {
        let mut room = room_with(transport);
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);
        seat(&mut room, ALPHA, 1, PlayerState::Playing, true);
        seat(&mut room, BETA, 2, PlayerState::Playing, true);
        assert!(rule.fire(trigger::START_GAME, &room));
        (rule, room)
    }

    #[test]
    fn test_initialize_splits_capacity() {
        let mut room = room_with(Box::new(NullTransport));
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);

        let alpha = room.roster().team(ALPHA).unwrap();
        assert_eq!(alpha.player_capacity(), 4);
        assert_eq!(alpha.spectator_capacity(), 2);
        assert_eq!(room.roster().len(), 2);

        rule.cleanup(&mut room);
        assert!(room.roster().is_empty());
    }

    #[test]
    fn test_initialize_handles_degenerate_capacity() {
        // unmapped capacity code -> player limit 0
        let key = MatchKey::from_raw(u32::from_le_bytes([0, 0, 0xFF, 0]));
        let mut room = Room::new(RoomOptions::new(key), Box::new(NullTransport));
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);

        assert_eq!(room.roster().team(ALPHA).unwrap().player_capacity(), 0);
    }

    #[test]
    fn test_rounds_total_from_score_limit() {
        let room = Room::new(
            RoomOptions::new(captain_key()).with_score_limit(3),
            Box::new(NullTransport),
        );
        assert_eq!(CaptainRule::new(&room).rounds_total(), 3);

        let room = Room::new(
            RoomOptions::new(captain_key()).with_score_limit(10),
            Box::new(NullTransport),
        );
        assert_eq!(CaptainRule::new(&room).rounds_total(), 5);
    }

    #[test]
    fn test_cannot_start_with_empty_team() {
        let mut room = room_with(Box::new(NullTransport));
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);
        seat(&mut room, ALPHA, 1, PlayerState::Lobby, true);

        assert!(!rule.fire(trigger::START_GAME, &room));
        assert_eq!(rule.current_state(), state::WAITING);
    }

    #[test]
    fn test_cannot_start_without_ready_player() {
        let mut room = room_with(Box::new(NullTransport));
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);
        // Player 1 is master (first joiner) and so counts as ready;
        // player 2 is neither ready nor master.
        seat(&mut room, ALPHA, 1, PlayerState::Lobby, false);
        seat(&mut room, BETA, 2, PlayerState::Lobby, false);

        assert!(!rule.fire(trigger::START_GAME, &room));

        room.player_mut(AccountId::new(2)).unwrap().is_ready = true;
        assert!(rule.fire(trigger::START_GAME, &room));
        assert!(rule.is_in_state(state::PLAYING));
    }

    #[test]
    fn test_developer_bypasses_start_guard() {
        let mut room = room_with(Box::new(NullTransport));
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);
        room.add_player(Player::new(AccountId::new(1)).developer());

        // Both teams are empty, nobody is ready.
        assert!(rule.fire(trigger::START_GAME, &room));
        assert_eq!(rule.current_state(), state::FIRST_HALF);
    }

    #[test]
    fn test_round_setup_broadcast_once() {
        let transport = MemoryTransport::new();
        let (mut rule, mut room) = started_match(Box::new(transport.clone()));

        rule.update(&mut room, Duration::from_millis(100));
        rule.update(&mut room, Duration::from_millis(100));
        rule.update(&mut room, Duration::from_millis(100));

        let setups: Vec<_> = transport
            .messages()
            .into_iter()
            .filter(|m| matches!(m, GameMessage::RoundSetup { .. }))
            .collect();
        assert_eq!(setups.len(), 1);

        let GameMessage::RoundSetup { lives } = &setups[0] else {
            unreachable!();
        };
        assert_eq!(lives.len(), 2);
        assert!(lives.iter().all(|l| l.hp == STARTING_HP));
    }

    #[test]
    fn test_team_wipe_forces_result() {
        let (mut rule, mut room) = started_match(Box::new(NullTransport));
        rule.update(&mut room, Duration::from_millis(100)); // clears the setup flag

        room.player_mut(AccountId::new(2)).unwrap().state = PlayerState::Lobby;
        rule.update(&mut room, Duration::from_millis(100));

        assert_eq!(rule.current_state(), state::ENTERING_RESULT);
        assert!(rule.is_in_state(state::PLAYING));
    }

    #[test]
    fn test_team_wipe_ignored_with_developer() {
        let (mut rule, mut room) = started_match(Box::new(NullTransport));
        rule.update(&mut room, Duration::from_millis(100));

        room.add_player(Player::new(AccountId::new(9)).developer());
        room.player_mut(AccountId::new(2)).unwrap().state = PlayerState::Lobby;
        rule.update(&mut room, Duration::from_millis(100));

        assert_eq!(rule.current_state(), state::FIRST_HALF);
    }

    #[test]
    fn test_round_limit_forces_result() {
        let transport = MemoryTransport::new();
        let (mut rule, mut room) = started_match(Box::new(transport.clone()));
        rule.update(&mut room, Duration::from_millis(100));

        for _ in 0..rule.rounds_total() {
            rule.complete_round();
            // each completed round re-arms the setup broadcast
            rule.update(&mut room, Duration::from_millis(100));
        }
        assert_eq!(rule.rounds_played(), rule.rounds_total());
        assert_eq!(rule.current_state(), state::FIRST_HALF);

        rule.update(&mut room, Duration::from_millis(100));
        assert_eq!(rule.current_state(), state::ENTERING_RESULT);

        let setups = transport
            .messages()
            .iter()
            .filter(|m| matches!(m, GameMessage::RoundSetup { .. }))
            .count();
        assert_eq!(setups as u32, 1 + rule.rounds_total());
    }

    #[test]
    fn test_timer_expiry_announces_without_advancing() {
        let transport = MemoryTransport::new();
        let mut room = Room::new(
            RoomOptions::new(captain_key()).with_time_limit(Duration::from_secs(10)),
            Box::new(transport.clone()),
        );
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);
        seat(&mut room, ALPHA, 1, PlayerState::Playing, true);
        seat(&mut room, BETA, 2, PlayerState::Playing, true);
        assert!(rule.fire(trigger::START_GAME, &room));
        rule.update(&mut room, Duration::from_millis(100));

        rule.update(&mut room, Duration::from_secs(11));

        assert!(transport.messages().contains(&GameMessage::SubRoundEnd));
        assert_eq!(rule.current_state(), state::FIRST_HALF);
        assert_eq!(rule.rounds_played(), 0);

        // the reset discarded the remainder: a small delta must not re-fire
        rule.update(&mut room, Duration::from_secs(1));
        let ends = transport
            .messages()
            .iter()
            .filter(|m| matches!(m, GameMessage::SubRoundEnd))
            .count();
        assert_eq!(ends, 1);
    }

    #[test]
    fn test_no_updates_outside_live_play() {
        let transport = MemoryTransport::new();
        let mut room = room_with(Box::new(transport.clone()));
        let mut rule = CaptainRule::new(&room);
        rule.initialize(&mut room);

        // Waiting: nothing happens.
        rule.update(&mut room, Duration::from_secs(600));
        assert!(transport.is_empty());

        seat(&mut room, ALPHA, 1, PlayerState::Playing, true);
        seat(&mut room, BETA, 2, PlayerState::Playing, true);
        assert!(rule.fire(trigger::START_GAME, &room));
        rule.update(&mut room, Duration::from_millis(100));
        assert!(rule.fire(trigger::START_RESULT, &room));

        // EnteringResult: ticks accumulate but nothing fires or broadcasts.
        let before = transport.len();
        rule.update(&mut room, Duration::from_secs(600));
        assert_eq!(transport.len(), before);
        assert_eq!(rule.current_state(), state::ENTERING_RESULT);
    }

    #[test]
    fn test_end_game_returns_to_waiting() {
        let (mut rule, mut room) = started_match(Box::new(NullTransport));
        assert!(rule.fire(trigger::START_RESULT, &room));
        assert!(rule.fire(trigger::START_RESULT, &room));
        assert_eq!(rule.current_state(), state::RESULT);

        assert!(rule.fire(trigger::END_GAME, &room));
        assert_eq!(rule.current_state(), state::WAITING);
        assert!(!rule.is_in_state(state::PLAYING));
    }
}
