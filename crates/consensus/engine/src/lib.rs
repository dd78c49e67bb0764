#![deny(unsafe_code)]
//! # maple-consensus-engine
//!
//! Ties the consensus components into one validation pipeline.
//!
//! A round collects proposals from agents concurrently under a timeout,
//! then scores each one in a single pass:
//!
//! ```text
//! validate -> assess risk -> adjusted trust x quality -> decide
//! ```
//!
//! Trust writes, intent admissions and escalation tickets are staged while
//! scoring and committed together when the round closes. A cancelled round
//! commits nothing.
//!
//! The engine also runs goal negotiation rounds (one trust decay pass each),
//! applies human verdicts to escalations and fails them closed once the
//! review window passes.

pub mod cancel;
pub mod config;
pub mod engine;
pub mod error;
pub mod escalation;
pub mod metrics;
pub mod source;
pub mod store;

pub use cancel::CancellationHandle;
pub use config::{ConsensusConfig, EngineConfig, LoggingConfig};
pub use engine::{ConsensusEngine, RestoreSummary, RoundReport};
pub use error::{ConfigError, EngineError, ReviewError, SourceError, StoreError};
pub use escalation::{EscalationTicket, RecordingReviewChannel, ReviewChannel};
pub use metrics::ConsensusMetrics;
pub use source::{
    FailingProposalSource, ProposalSource, SilentProposalSource, SimulatedProposalSource,
    SourcedProposal,
};
pub use store::{ConsensusStore, InMemoryConsensusStore};
