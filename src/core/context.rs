//! Process-wide engine context.
//!
//! There is no ambient global: the host constructs one `EngineContext` at
//! process start and passes it to everything that creates matches.

use crate::games::captain::{CaptainRule, CAPTAIN_RULE_ID};
use crate::rules::{GameRule, RuleRegistry};
use crate::room::Room;

use super::RuleId;

/// Shared, read-only engine configuration: the mode registry.
#[derive(Default)]
pub struct EngineContext {
    registry: RuleRegistry,
}

impl EngineContext {
    /// Context with no modes registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with every built-in mode registered.
    #[must_use]
    pub fn with_default_rules() -> Self {
        let mut context = Self::new();
        context
            .registry_mut()
            .register(CAPTAIN_RULE_ID, Box::new(|room| Box::new(CaptainRule::new(room))));
        context
    }

    /// The mode registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Mutable registry access, for registering modes at startup.
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Build the rule engine a room's match descriptor selects.
    #[must_use]
    pub fn create_rule(&self, room: &Room) -> Option<Box<dyn GameRule>> {
        self.registry.create(room.options().match_key.rule(), room)
    }

    /// Convenience: whether a selector has a registered mode.
    #[must_use]
    pub fn supports(&self, rule_id: RuleId) -> bool {
        self.registry.contains(rule_id)
    }
}
