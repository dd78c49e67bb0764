#![deny(unsafe_code)]
//! # maple-consensus-weighting
//!
//! The Contextual Weighter: an ordered, data-driven table of
//! `(predicate, multiplier)` rules that adjusts an agent's base trust for the
//! task at hand. New rules are configuration, not code.

pub mod error;
pub mod rule;
pub mod weighter;

pub use error::WeightingError;
pub use rule::WeightRule;
pub use weighter::{ContextualWeighter, WeightingConfig};
