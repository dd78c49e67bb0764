//! Proposal sources: the agent-facing side of a round.

use crate::error::SourceError;
use async_trait::async_trait;
use maple_consensus_types::{Agent, Proposal, TaskContext, ValidationSignal};
use std::time::Duration;

/// A proposal plus the sandbox's verdict on it, when one exists.
#[derive(Clone, Debug, PartialEq)]
pub struct SourcedProposal {
    pub proposal: Proposal,
    pub signal: Option<ValidationSignal>,
}

impl SourcedProposal {
    pub fn new(proposal: Proposal) -> Self {
        Self {
            proposal,
            signal: None,
        }
    }

    pub fn with_signal(mut self, signal: ValidationSignal) -> Self {
        self.signal = Some(signal);
        self
    }
}

/// Something that answers a task context with a proposal.
///
/// The engine bounds every call with the collection timeout; an
/// implementation never needs its own.
#[async_trait]
pub trait ProposalSource: Send + Sync {
    /// The agent this source speaks for.
    fn agent(&self) -> Agent;

    async fn propose(&self, ctx: &TaskContext) -> Result<SourcedProposal, SourceError>;
}

/// Returns a fixed proposal, optionally after a delay.
pub struct SimulatedProposalSource {
    agent: Agent,
    response: SourcedProposal,
    delay: Option<Duration>,
}

impl SimulatedProposalSource {
    pub fn new(agent: Agent, proposal: Proposal) -> Self {
        Self {
            agent,
            response: SourcedProposal::new(proposal),
            delay: None,
        }
    }

    pub fn with_signal(mut self, signal: ValidationSignal) -> Self {
        self.response.signal = Some(signal);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ProposalSource for SimulatedProposalSource {
    fn agent(&self) -> Agent {
        self.agent.clone()
    }

    async fn propose(&self, _ctx: &TaskContext) -> Result<SourcedProposal, SourceError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.response.clone())
    }
}

/// Never answers.
pub struct SilentProposalSource {
    agent: Agent,
}

impl SilentProposalSource {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl ProposalSource for SilentProposalSource {
    fn agent(&self) -> Agent {
        self.agent.clone()
    }

    async fn propose(&self, _ctx: &TaskContext) -> Result<SourcedProposal, SourceError> {
        futures::future::pending().await
    }
}

/// Always fails.
pub struct FailingProposalSource {
    agent: Agent,
    reason: String,
}

impl FailingProposalSource {
    pub fn new(agent: Agent, reason: impl Into<String>) -> Self {
        Self {
            agent,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ProposalSource for FailingProposalSource {
    fn agent(&self) -> Agent {
        self.agent.clone()
    }

    async fn propose(&self, _ctx: &TaskContext) -> Result<SourcedProposal, SourceError> {
        Err(SourceError::Unavailable(
            self.agent.id.clone(),
            self.reason.clone(),
        ))
    }
}
