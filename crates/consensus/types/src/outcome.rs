//! Terminal decisions for proposals.

use crate::ids::{AgentId, ProposalId};
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final decision on a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    Rejected,
    EscalatedToHuman,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
            Self::EscalatedToHuman => write!(f, "escalated-to-human"),
        }
    }
}

/// Why a decision was reached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DecisionReason {
    /// Missing required field; never reached risk assessment.
    Malformed(String),
    ThresholdMet,
    ThresholdMiss,
    /// Score fell inside the escalation band below the threshold.
    Borderline,
    CriticalRisk,
    HumanApproved,
    HumanRejected,
    /// No human verdict inside the review window (fail-closed).
    ReviewWindowExpired,
}

/// Binary verdict returned by the human review channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanVerdict {
    Approve,
    Reject,
}

/// Everything that went into a weighted score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    pub base_trust: f64,
    pub multiplier: f64,
    pub adjusted_trust: f64,
    pub quality: f64,
    pub weighted_score: f64,
    pub risk_level: RiskLevel,
    pub required_threshold: f64,
}

/// The single terminal outcome for one proposal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    pub proposal_id: ProposalId,
    pub agent_id: AgentId,
    pub decision: Decision,
    pub reason: DecisionReason,
    pub weighted_score: f64,
    /// Absent for malformed proposals, which are never scored.
    pub breakdown: Option<ScoringBreakdown>,
    pub decided_at_ms: u64,
}

impl ConsensusOutcome {
    pub fn is_accepted(&self) -> bool {
        self.decision == Decision::Accepted
    }

    pub fn is_escalated(&self) -> bool {
        self.decision == Decision::EscalatedToHuman
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.breakdown.as_ref().map(|b| b.risk_level)
    }
}
