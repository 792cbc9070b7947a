//! Rule registry: rule selector to engine factory.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::engine::GameRule;
use crate::core::RuleId;
use crate::room::Room;

/// Factory producing a rule engine bound to a room.
///
/// The factory receives the room so it can read options at construction
/// time (round counts, capacities); it must not hold onto the reference.
pub type RuleFactory = Box<dyn Fn(&Room) -> Box<dyn GameRule> + Send + Sync>;

/// Registry of game-mode factories keyed by [`RuleId`].
///
/// New modes register a factory; nothing else in the engine needs to know
/// they exist.
#[derive(Default)]
pub struct RuleRegistry {
    factories: FxHashMap<RuleId, RuleFactory>,
}

impl RuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mode factory.
    ///
    /// Panics if the rule ID is already registered.
    pub fn register(&mut self, rule_id: RuleId, factory: RuleFactory) {
        if self.factories.contains_key(&rule_id) {
            panic!("rule {rule_id} already registered");
        }
        self.factories.insert(rule_id, factory);
    }

    /// Check if a rule ID is registered.
    #[must_use]
    pub fn contains(&self, rule_id: RuleId) -> bool {
        self.factories.contains_key(&rule_id)
    }

    /// Number of registered modes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build an engine for `rule_id`, bound to `room`.
    ///
    /// Returns `None` for an unregistered selector; the caller decides
    /// whether that is a refusal or a fault.
    #[must_use]
    pub fn create(&self, rule_id: RuleId, room: &Room) -> Option<Box<dyn GameRule>> {
        match self.factories.get(&rule_id) {
            Some(factory) => Some(factory(room)),
            None => {
                warn!(rule = %rule_id, "no factory for rule selector");
                None
            }
        }
    }
}
