//! Goal proposals for the next evolution cycle.

use crate::ids::{AgentId, GoalId};
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// A competing candidate for the next cycle's objective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalProposal {
    pub id: GoalId,
    pub agent_id: AgentId,
    pub objective: String,
    pub estimated_reward: f64,
    pub risk_level: RiskLevel,
    pub domain: String,
    /// Position in the round; lower wins ties.
    pub submission_index: usize,
}

impl GoalProposal {
    pub fn new(
        agent_id: impl Into<AgentId>,
        objective: impl Into<String>,
        domain: impl Into<String>,
        estimated_reward: f64,
    ) -> Self {
        Self {
            id: GoalId::generate(),
            agent_id: agent_id.into(),
            objective: objective.into(),
            estimated_reward,
            risk_level: RiskLevel::Low,
            domain: domain.into(),
            submission_index: 0,
        }
    }

    pub fn with_risk(mut self, level: RiskLevel) -> Self {
        self.risk_level = level;
        self
    }

    pub fn with_submission_index(mut self, index: usize) -> Self {
        self.submission_index = index;
        self
    }
}
