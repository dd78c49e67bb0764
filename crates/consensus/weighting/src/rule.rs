use maple_consensus_types::{Agent, AgentRole, RiskLevel, TaskContext};
use serde::{Deserialize, Serialize};

/// One contextual weighting rule.
///
/// Every `Some`/non-empty field is a predicate; a rule matches when all of
/// its predicates hold. Unconstrained fields match anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRule {
    pub name: String,
    /// Agent roles the rule applies to. Empty matches any role.
    #[serde(default)]
    pub roles: Vec<AgentRole>,
    /// Task domain, compared case-insensitively.
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub file_category: Option<String>,
    /// Task risk must be at least this level.
    #[serde(default)]
    pub min_risk: Option<RiskLevel>,
    /// Agent must be a specialist in the task's domain.
    #[serde(default)]
    pub specialist_domain_match: bool,
    /// Agent role must be technical (see `AgentRole::is_technical`).
    #[serde(default)]
    pub technical_only: bool,
    pub multiplier: f64,
}

impl WeightRule {
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
            domain: None,
            file_category: None,
            min_risk: None,
            specialist_domain_match: false,
            technical_only: false,
            multiplier,
        }
    }

    pub fn for_roles(mut self, roles: impl IntoIterator<Item = AgentRole>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    pub fn in_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn in_file_category(mut self, category: impl Into<String>) -> Self {
        self.file_category = Some(category.into());
        self
    }

    pub fn at_least(mut self, risk: RiskLevel) -> Self {
        self.min_risk = Some(risk);
        self
    }

    pub fn for_domain_specialists(mut self) -> Self {
        self.specialist_domain_match = true;
        self
    }

    pub fn for_technical_roles(mut self) -> Self {
        self.technical_only = true;
        self
    }

    /// Number of constrained predicates.
    pub fn specificity(&self) -> usize {
        usize::from(!self.roles.is_empty())
            + usize::from(self.domain.is_some())
            + usize::from(self.file_category.is_some())
            + usize::from(self.min_risk.is_some())
            + usize::from(self.specialist_domain_match)
            + usize::from(self.technical_only)
    }

    pub fn matches(&self, agent: &Agent, ctx: &TaskContext) -> bool {
        if !self.roles.is_empty() && !self.roles.contains(&agent.role) {
            return false;
        }
        if self.technical_only && !agent.role.is_technical() {
            return false;
        }
        if let Some(domain) = &self.domain {
            if !domain.eq_ignore_ascii_case(&ctx.domain) {
                return false;
            }
        }
        if let Some(category) = &self.file_category {
            match &ctx.file_category {
                Some(actual) if category.eq_ignore_ascii_case(actual) => {}
                _ => return false,
            }
        }
        if let Some(min) = self.min_risk {
            if ctx.risk_level < min {
                return false;
            }
        }
        if self.specialist_domain_match {
            match agent.role.specialty() {
                Some(specialty) if specialty.eq_ignore_ascii_case(&ctx.domain) => {}
                _ => return false,
            }
        }
        true
    }
}
