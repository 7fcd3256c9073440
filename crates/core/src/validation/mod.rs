//! Field validation engine.
//!
//! Provides rule types with a chained builder and a pure-logic evaluator.

pub mod evaluator;
pub mod rules;
