//! Generic hierarchical state machine with guarded transitions.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// State identifier. Modes define what states exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(pub u16);

impl StateId {
    /// Create a new state ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "State({})", self.0)
    }
}

/// Trigger identifier: a named event offered to the machine to request a
/// transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u16);

impl TriggerId {
    /// Create a new trigger ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// Transition guard: a side-effect-free predicate over the fire context.
///
/// Plain function pointers keep guards free of captured state; everything a
/// guard may consult must come in through `&C`.
pub type Guard<C> = fn(&C) -> bool;

struct Transition<C> {
    target: StateId,
    guard: Option<Guard<C>>,
}

struct StateNode<C> {
    parent: Option<StateId>,
    transitions: FxHashMap<TriggerId, Transition<C>>,
}

impl<C> Default for StateNode<C> {
    fn default() -> Self {
        Self {
            parent: None,
            transitions: FxHashMap::default(),
        }
    }
}

/// Hierarchical state machine.
///
/// States form a tree via a substate-of relation. Transitions are keyed by
/// `(state, trigger)`; firing a trigger consults the current state first,
/// then walks up the ancestor chain. Guards are evaluated at fire time and
/// a refusal (no match, or no guard passed) leaves the state untouched.
///
/// Transitions carry no implicit entry/exit side effects: callers perform
/// any such work explicitly around the [`fire`](Self::fire) call.
///
/// ## Example
///
/// ```
/// use match_rules::fsm::{RuleStateMachine, state, trigger};
///
/// let mut machine: RuleStateMachine<()> = RuleStateMachine::new(state::WAITING);
/// machine.configure(state::WAITING).permit(trigger::START_GAME, state::FIRST_HALF);
/// machine
///     .configure(state::FIRST_HALF)
///     .substate_of(state::PLAYING)
///     .permit(trigger::START_RESULT, state::RESULT);
///
/// assert!(machine.fire(trigger::START_GAME, &()));
/// assert!(machine.is_in_state(state::FIRST_HALF));
/// assert!(machine.is_in_state(state::PLAYING));
/// ```
pub struct RuleStateMachine<C> {
    states: FxHashMap<StateId, StateNode<C>>,
    current: StateId,
}

impl<C> RuleStateMachine<C> {
    /// Create a machine resting in `initial`.
    #[must_use]
    pub fn new(initial: StateId) -> Self {
        let mut states = FxHashMap::default();
        states.insert(initial, StateNode::default());
        Self {
            states,
            current: initial,
        }
    }

    /// Begin configuring a state. Setup-time only.
    ///
    /// Creates the state node if it does not exist yet.
    pub fn configure(&mut self, state: StateId) -> StateConfigurer<'_, C> {
        self.states.entry(state).or_default();
        StateConfigurer {
            machine: self,
            state,
        }
    }

    /// The current (leaf) state.
    #[must_use]
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Whether the machine is in `state`, directly or via an ancestor.
    #[must_use]
    pub fn is_in_state(&self, state: StateId) -> bool {
        self.active_chain().contains(&state)
    }

    /// Offer a trigger to the machine.
    ///
    /// Walks the current state and its ancestors; the first registered
    /// `(state, trigger)` entry whose guard (if any) passes moves the
    /// machine to its target and returns true. Otherwise the state is left
    /// unchanged and false is returned - a refused transition is expected
    /// control flow, not an error.
    pub fn fire(&mut self, trigger: TriggerId, ctx: &C) -> bool {
        for state in self.active_chain() {
            let Some(node) = self.states.get(&state) else {
                continue;
            };
            let Some(transition) = node.transitions.get(&trigger) else {
                continue;
            };
            if transition.guard.is_some_and(|guard| !guard(ctx)) {
                trace!(%state, %trigger, "transition guard refused");
                continue;
            }

            let target = transition.target;
            debug!(from = %self.current, %trigger, to = %target, "state transition");
            self.current = target;
            return true;
        }

        trace!(state = %self.current, %trigger, "no transition for trigger");
        false
    }

    /// The current state followed by its ancestors, root last.
    ///
    /// Stops if a parent link forms a cycle, so a miswired setup cannot
    /// hang `fire` or `is_in_state`.
    fn active_chain(&self) -> SmallVec<[StateId; 8]> {
        let mut chain = SmallVec::new();
        let mut cursor = Some(self.current);

        while let Some(state) = cursor {
            if chain.contains(&state) {
                debug_assert!(false, "cycle in substate relation at {state}");
                break;
            }
            chain.push(state);
            cursor = self.states.get(&state).and_then(|node| node.parent);
        }

        chain
    }
}

/// Fluent configuration handle for one state. Setup-time only.
pub struct StateConfigurer<'a, C> {
    machine: &'a mut RuleStateMachine<C>,
    state: StateId,
}

impl<'a, C> StateConfigurer<'a, C> {
    /// Declare this state a substate of `parent`.
    pub fn substate_of(self, parent: StateId) -> Self {
        self.machine.states.entry(parent).or_default();
        let node = self
            .machine
            .states
            .get_mut(&self.state)
            .expect("state node created by configure");
        node.parent = Some(parent);
        self
    }

    /// Register an unguarded transition.
    ///
    /// Panics if a transition for `trigger` is already registered on this
    /// state - at most one transition per `(state, trigger)` pair.
    pub fn permit(self, trigger: TriggerId, target: StateId) -> Self {
        self.permit_inner(trigger, target, None)
    }

    /// Register a guarded transition.
    ///
    /// Panics on a duplicate `(state, trigger)` registration.
    pub fn permit_if(self, trigger: TriggerId, target: StateId, guard: Guard<C>) -> Self {
        self.permit_inner(trigger, target, Some(guard))
    }

    fn permit_inner(self, trigger: TriggerId, target: StateId, guard: Option<Guard<C>>) -> Self {
        self.machine.states.entry(target).or_default();
        let node = self
            .machine
            .states
            .get_mut(&self.state)
            .expect("state node created by configure");
        if node.transitions.contains_key(&trigger) {
            panic!(
                "transition for {trigger} already registered on {state}",
                state = self.state
            );
        }
        node.transitions.insert(trigger, Transition { target, guard });
        self
    }
}
