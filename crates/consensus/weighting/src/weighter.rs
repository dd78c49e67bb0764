use crate::error::WeightingError;
use crate::rule::WeightRule;
use maple_consensus_types::{Agent, AgentRole, ContextWeight, RiskLevel, TaskContext, TrustScore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rule table plus the bound every applied multiplier is clamped into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingConfig {
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    /// Ordered most- to least-specific; earlier rules win ties.
    pub rules: Vec<WeightRule>,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        Self {
            min_multiplier: 0.1,
            max_multiplier: 3.0,
            rules: default_rules(),
        }
    }
}

fn default_rules() -> Vec<WeightRule> {
    vec![
        WeightRule::new("security-on-critical", 2.0)
            .for_roles([AgentRole::Security])
            .at_least(RiskLevel::Critical),
        WeightRule::new("domain-specialist", 1.8).for_domain_specialists(),
        WeightRule::new("technical-on-documentation", 0.5)
            .for_technical_roles()
            .in_domain("documentation"),
    ]
}

/// Adjusts base trust for a task context.
#[derive(Debug, Clone)]
pub struct ContextualWeighter {
    config: WeightingConfig,
}

impl ContextualWeighter {
    pub fn new(config: WeightingConfig) -> Result<Self, WeightingError> {
        let (min, max) = (config.min_multiplier, config.max_multiplier);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(WeightingError::InvalidBound { min, max });
        }
        if let Some(rule) = config
            .rules
            .iter()
            .find(|r| !r.multiplier.is_finite() || r.multiplier < 0.0)
        {
            return Err(WeightingError::InvalidMultiplier {
                name: rule.name.clone(),
                multiplier: rule.multiplier,
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &WeightingConfig {
        &self.config
    }

    /// Multiplier for an agent in a context.
    ///
    /// The most specific matching rule wins; among equally specific rules
    /// the first declared wins. No match means ×1.0. The applied value is
    /// always inside `[min_multiplier, max_multiplier]`.
    pub fn weight(&self, agent: &Agent, ctx: &TaskContext) -> ContextWeight {
        let mut best: Option<&WeightRule> = None;
        for rule in &self.config.rules {
            if !rule.matches(agent, ctx) {
                continue;
            }
            match best {
                Some(current) if current.specificity() >= rule.specificity() => {}
                _ => best = Some(rule),
            }
        }

        let raw = best.map(|r| r.multiplier).unwrap_or(1.0);
        let applied = self.clamp(raw);

        debug!(
            agent = %agent.id,
            role = %agent.role,
            domain = %ctx.domain,
            rule = best.map(|r| r.name.as_str()).unwrap_or("none"),
            raw,
            applied,
            "Context weight resolved"
        );

        ContextWeight {
            agent_id: agent.id.clone(),
            rule: best.map(|r| r.name.clone()),
            raw,
            applied,
        }
    }

    /// Base trust multiplied by the applied context weight.
    pub fn adjusted_trust(
        &self,
        agent: &Agent,
        ctx: &TaskContext,
        base: TrustScore,
    ) -> (ContextWeight, f64) {
        let weight = self.weight(agent, ctx);
        let adjusted = base.value() * weight.applied;
        (weight, adjusted)
    }

    fn clamp(&self, multiplier: f64) -> f64 {
        if multiplier.is_nan() {
            return 1.0_f64.clamp(self.config.min_multiplier, self.config.max_multiplier);
        }
        multiplier.clamp(self.config.min_multiplier, self.config.max_multiplier)
    }
}

impl Default for ContextualWeighter {
    fn default() -> Self {
        Self {
            config: WeightingConfig::default(),
        }
    }
}
