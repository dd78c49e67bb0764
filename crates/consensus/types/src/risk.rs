//! Risk classification records.

use crate::ids::ProposalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much harm a proposal could cause if wrongly accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Elevated,
    Critical,
}

impl RiskLevel {
    /// Critical proposals always go to a human.
    pub fn requires_human_review(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Elevated => write!(f, "elevated"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Result of assessing one proposal. Computed fresh per proposal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub proposal_id: ProposalId,
    pub level: RiskLevel,
    /// Weighted score needed for acceptance.
    pub required_threshold: f64,
    /// Payload complexity in [0, 1].
    pub complexity: f64,
    pub affected_domains: Vec<String>,
}
