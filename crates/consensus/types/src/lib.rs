#![deny(unsafe_code)]
//! # maple-consensus-types
//!
//! Record shapes shared by every component of the consensus layer: agents,
//! proposals, risk assessments, task contexts, outcomes, strategic intents
//! and goal proposals.
//!
//! Everything here is plain data. Behaviour lives in the component crates
//! (`maple-consensus-trust`, `-risk`, `-weighting`, `-intent-cache`,
//! `-goal-arbiter`) and is orchestrated by `maple-consensus-engine`.

pub mod agent;
pub mod context;
pub mod error;
pub mod goal;
pub mod ids;
pub mod intent;
pub mod outcome;
pub mod proposal;
pub mod risk;
pub mod trust;

pub use agent::{Agent, AgentRole};
pub use context::{ContextWeight, TaskContext};
pub use error::ProposalError;
pub use goal::GoalProposal;
pub use ids::{AgentId, GoalId, IntentId, ProposalId};
pub use intent::StrategicIntent;
pub use outcome::{ConsensusOutcome, Decision, DecisionReason, HumanVerdict, ScoringBreakdown};
pub use proposal::{HallucinationClass, Proposal, ProposalPayload, ValidationSignal};
pub use risk::{RiskAssessment, RiskLevel};
pub use trust::{TrustScore, TrustSnapshot};
