//! Code-mutation proposals and the sandbox quality signal.

use crate::error::ProposalError;
use crate::ids::{AgentId, ProposalId};
use serde::{Deserialize, Serialize};

/// Self-declared hallucination class of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HallucinationClass {
    Noise,
    SalvageCandidate,
    NovelInsight,
}

/// Opaque content plus the agent's rationale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalPayload {
    pub content: String,
    pub rationale: String,
}

/// A candidate code mutation submitted by an agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub agent_id: AgentId,
    pub payload: ProposalPayload,
    /// Primary target domain/category.
    pub domain: String,
    /// Every domain the change touches.
    pub affected_domains: Vec<String>,
    pub hallucination_class: HallucinationClass,
    pub novel: bool,
    pub submitted_at_ms: u64,
}

impl Proposal {
    pub fn new(
        agent_id: impl Into<AgentId>,
        domain: impl Into<String>,
        content: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        let domain = domain.into();
        Self {
            id: ProposalId::generate(),
            agent_id: agent_id.into(),
            payload: ProposalPayload {
                content: content.into(),
                rationale: rationale.into(),
            },
            affected_domains: vec![domain.clone()],
            domain,
            hallucination_class: HallucinationClass::SalvageCandidate,
            novel: false,
            submitted_at_ms: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<ProposalId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_affected_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        if !self.affected_domains.contains(&domain) {
            self.affected_domains.push(domain);
        }
        self
    }

    pub fn with_class(mut self, class: HallucinationClass) -> Self {
        self.hallucination_class = class;
        self
    }

    /// Declare the proposal a novel insight (class and flag together).
    pub fn novel_insight(mut self) -> Self {
        self.hallucination_class = HallucinationClass::NovelInsight;
        self.novel = true;
        self
    }

    pub fn submitted_at(mut self, ms: u64) -> Self {
        self.submitted_at_ms = ms;
        self
    }

    pub fn is_novel_insight(&self) -> bool {
        self.novel || self.hallucination_class == HallucinationClass::NovelInsight
    }

    /// Check that every required field carries content.
    pub fn validate(&self) -> Result<(), ProposalError> {
        if self.id.is_empty() {
            return Err(ProposalError::MissingField("id"));
        }
        if self.agent_id.is_empty() {
            return Err(ProposalError::MissingField("agent_id"));
        }
        if self.payload.content.trim().is_empty() {
            return Err(ProposalError::MissingField("content"));
        }
        if self.payload.rationale.trim().is_empty() {
            return Err(ProposalError::MissingField("rationale"));
        }
        if self.domain.trim().is_empty() {
            return Err(ProposalError::MissingField("domain"));
        }
        Ok(())
    }
}

/// Objective quality signal supplied by the validation sandbox.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationSignal {
    pub passed: bool,
    /// Scalar quality estimate in [0, 1].
    pub quality: f64,
}

impl ValidationSignal {
    pub fn passed(quality: f64) -> Self {
        Self {
            passed: true,
            quality,
        }
    }

    pub fn failed() -> Self {
        Self {
            passed: false,
            quality: 0.0,
        }
    }

    /// Quality used for scoring: zero when validation failed.
    pub fn effective_quality(&self) -> f64 {
        if self.passed && self.quality.is_finite() {
            self.quality.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
