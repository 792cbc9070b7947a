//! Generic rule-engine surface.
//!
//! Game modes implement [`GameRule`] to define their lifecycle and scoring;
//! a [`RuleRegistry`] maps the decoded rule selector to a factory. Modes
//! are selected by data, not by a class hierarchy.

mod engine;
mod record;
mod registry;

pub use engine::GameRule;
pub use record::{RecordBase, ScoreRecord};
pub use registry::{RuleFactory, RuleRegistry};
