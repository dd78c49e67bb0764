use maple_consensus_goal_arbiter::ArbiterError;
use maple_consensus_risk::RiskError;
use maple_consensus_trust::TrustError;
use maple_consensus_types::{AgentId, ProposalId};
use maple_consensus_weighting::WeightingError;

/// Errors surfaced by the consensus engine.
///
/// Per-proposal problems never appear here; they become outcomes.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("round {0} cancelled before commit")]
    RoundCancelled(u64),
    #[error("no pending escalation for proposal {0}")]
    UnknownEscalation(ProposalId),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("trust registry error: {0}")]
    Trust(#[from] TrustError),
}

/// Failure of a proposal source. The engine treats every variant as a
/// non-vote.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("agent {0} unavailable: {1}")]
    Unavailable(AgentId, String),
    #[error("agent {expected} returned a proposal signed by {actual}")]
    AgentMismatch { expected: AgentId, actual: AgentId },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O: {0}")]
    Io(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("review channel unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<RiskError> for ConfigError {
    fn from(e: RiskError) -> Self {
        Self::Invalid(e.to_string())
    }
}

impl From<WeightingError> for ConfigError {
    fn from(e: WeightingError) -> Self {
        Self::Invalid(e.to_string())
    }
}

impl From<ArbiterError> for ConfigError {
    fn from(e: ArbiterError) -> Self {
        Self::Invalid(e.to_string())
    }
}

impl From<TrustError> for ConfigError {
    fn from(e: TrustError) -> Self {
        Self::Invalid(e.to_string())
    }
}
