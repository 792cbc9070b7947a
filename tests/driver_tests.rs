//! Multi-room driver behavior: independence and fault isolation.
//!
//! Also verifies that `GameRule` is implementable outside the crate, which
//! is how hosts ship custom modes.

use std::time::Duration;

use match_rules::fsm::{state, StateId, TriggerId};
use match_rules::games::captain::{CaptainRecord, ALPHA, BETA, CAPTAIN_RULE_ID};
use match_rules::{
    AccountId, EngineContext, GameRule, MatchDriver, MatchKey, MatchSession, MemoryTransport,
    NullTransport, Player, PlayerState, Room, RoomOptions, RuleId, ScoreRecord, SessionError,
};

const BROKEN_RULE_ID: RuleId = RuleId::new(15);

fn key_for(rule: RuleId) -> MatchKey {
    MatchKey::from_raw(u32::from_le_bytes([rule.raw() << 4, 0, 3, 0]))
}

/// External mode whose update always panics.
struct BrokenRule;

impl GameRule for BrokenRule {
    fn rule_id(&self) -> RuleId {
        BROKEN_RULE_ID
    }

    fn initialize(&mut self, _room: &mut Room) {}

    fn cleanup(&mut self, _room: &mut Room) {}

    fn update(&mut self, _room: &mut Room, _delta: Duration) {
        panic!("mode bug");
    }

    fn player_record(&self, player: &Player) -> Box<dyn ScoreRecord> {
        Box::new(CaptainRecord::new(player.account_id))
    }

    fn fire(&mut self, _trigger: TriggerId, _room: &Room) -> bool {
        false
    }

    fn is_in_state(&self, _state: StateId) -> bool {
        false
    }

    fn current_state(&self) -> StateId {
        state::WAITING
    }
}

fn context_with_broken_rule() -> EngineContext {
    let mut context = EngineContext::with_default_rules();
    context
        .registry_mut()
        .register(BROKEN_RULE_ID, Box::new(|_room| Box::new(BrokenRule)));
    context
}

#[test]
fn test_unknown_rule_selector_refused_at_creation() {
    let context = EngineContext::new();
    let result = MatchSession::new(
        &context,
        RoomOptions::new(key_for(CAPTAIN_RULE_ID)),
        Box::new(NullTransport),
    );
    assert_eq!(
        result.err(),
        Some(SessionError::UnknownRule(CAPTAIN_RULE_ID))
    );
}

#[test]
fn test_faulted_session_does_not_stop_the_others() {
    let context = context_with_broken_rule();
    let transport = MemoryTransport::new();

    let mut driver = MatchDriver::new();
    let broken = driver.add(
        MatchSession::new(
            &context,
            RoomOptions::new(key_for(BROKEN_RULE_ID)),
            Box::new(NullTransport),
        )
        .unwrap(),
    );

    let mut live = MatchSession::new(
        &context,
        RoomOptions::new(key_for(CAPTAIN_RULE_ID)),
        Box::new(transport.clone()),
    )
    .unwrap();
    {
        let room = live.room_mut();
        room.add_player(
            Player::new(AccountId::new(1))
                .with_state(PlayerState::Playing)
                .ready(),
        );
        room.add_player(
            Player::new(AccountId::new(2))
                .with_state(PlayerState::Playing)
                .ready(),
        );
        room.roster_mut().join(ALPHA, AccountId::new(1)).unwrap();
        room.roster_mut().join(BETA, AccountId::new(2)).unwrap();
    }
    assert!(live.fire(match_rules::fsm::trigger::START_GAME));
    let live = driver.add(live);

    // The broken session faults on the first tick; the live one still
    // produces its round setup.
    driver.tick_all(Duration::from_millis(100));
    driver.tick_all(Duration::from_millis(100));

    assert!(driver.session(broken).unwrap().is_faulted());
    assert!(!driver.session(live).unwrap().is_faulted());
    assert_eq!(transport.len(), 1);

    // A faulted session is skipped, not re-ticked.
    driver.tick_all(Duration::from_millis(100));
    assert_eq!(driver.prune_faulted(), 1);
    assert_eq!(driver.len(), 1);
}

#[test]
fn test_sessions_share_no_state() {
    let context = EngineContext::with_default_rules();
    let mut driver = MatchDriver::new();

    let a = driver.add(
        MatchSession::new(
            &context,
            RoomOptions::new(key_for(CAPTAIN_RULE_ID)),
            Box::new(NullTransport),
        )
        .unwrap(),
    );
    let b = driver.add(
        MatchSession::new(
            &context,
            RoomOptions::new(key_for(CAPTAIN_RULE_ID)),
            Box::new(NullTransport),
        )
        .unwrap(),
    );

    driver
        .session_mut(a)
        .unwrap()
        .room_mut()
        .add_player(Player::new(AccountId::new(1)));

    assert_eq!(driver.session(a).unwrap().room().players().len(), 1);
    assert_eq!(driver.session(b).unwrap().room().players().len(), 0);
}
