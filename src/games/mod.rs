//! Concrete game modes built on the generic engine.

pub mod captain;
