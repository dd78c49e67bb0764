//! Task context and contextual weights.

use crate::ids::AgentId;
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// The situation a proposal is being judged in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContext {
    pub domain: String,
    pub file_category: Option<String>,
    pub risk_level: RiskLevel,
}

impl TaskContext {
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            file_category: None,
            risk_level: RiskLevel::Low,
        }
    }

    pub fn with_file_category(mut self, category: impl Into<String>) -> Self {
        self.file_category = Some(category.into());
        self
    }

    pub fn with_risk(mut self, level: RiskLevel) -> Self {
        self.risk_level = level;
        self
    }
}

/// Multiplier applied to an agent's base trust for one task context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextWeight {
    pub agent_id: AgentId,
    /// Rule that matched, if any.
    pub rule: Option<String>,
    /// Multiplier as declared by the rule.
    pub raw: f64,
    /// Multiplier after clamping to the configured bound.
    pub applied: f64,
}
