#![deny(unsafe_code)]
//! # maple-consensus-goal-arbiter
//!
//! Chooses one goal among competing goal proposals for the next evolution
//! cycle. A goal's score is its estimated reward scaled by intent alignment,
//! multiplied by the proposing agent's context-weighted trust and divided
//! by a risk penalty. The arbiter holds no state between rounds.

pub mod arbiter;
pub mod error;
pub mod state;

pub use arbiter::{ArbiterConfig, CandidateScore, GoalArbiter, GoalSelection};
pub use error::ArbiterError;
pub use state::GlobalState;
