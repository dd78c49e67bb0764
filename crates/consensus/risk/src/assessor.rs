use crate::complexity::{line_factor, normalized_entropy};
use crate::error::RiskError;
use maple_consensus_types::{Proposal, RiskAssessment, RiskLevel};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Required threshold attached to critical proposals. Unreachable for
/// automatic acceptance: critical proposals always escalate.
pub const CRITICAL_THRESHOLD: f64 = 1.0;

/// Risk heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Complexity above this is critical.
    pub complexity_threshold: f64,
    /// Touching any of these domains is critical.
    pub core_domains: Vec<String>,
    /// Required threshold for self-declared novel insights.
    pub elevated_threshold: f64,
    /// Required threshold for everything else.
    pub default_threshold: f64,
    /// Line count at which size pressure saturates.
    pub line_budget: usize,
    /// Share of complexity taken from byte entropy; the rest is size.
    pub entropy_weight: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: 0.7,
            core_domains: ["auth", "consensus", "crypto", "kernel", "pii", "security"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            elevated_threshold: 0.85,
            default_threshold: 0.6,
            line_budget: 400,
            entropy_weight: 0.6,
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> Result<(), RiskError> {
        for (name, value) in [
            ("complexity_threshold", self.complexity_threshold),
            ("elevated_threshold", self.elevated_threshold),
            ("default_threshold", self.default_threshold),
            ("entropy_weight", self.entropy_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RiskError::InvalidConfig(format!(
                    "{name} {value} outside [0, 1]"
                )));
            }
        }
        if self.line_budget == 0 {
            return Err(RiskError::InvalidConfig("line_budget must be positive".into()));
        }
        Ok(())
    }
}

/// Classifies proposals and attaches their acceptance threshold.
#[derive(Debug, Clone, Default)]
pub struct RiskAssessor {
    config: RiskConfig,
}

impl RiskAssessor {
    pub fn new(config: RiskConfig) -> Result<Self, RiskError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Blend of byte entropy and size pressure, in [0, 1].
    pub fn complexity(&self, content: &str) -> f64 {
        let w = self.config.entropy_weight;
        (w * normalized_entropy(content) + (1.0 - w) * line_factor(content, self.config.line_budget))
            .clamp(0.0, 1.0)
    }

    /// Whether any of `domains` is a configured core domain.
    pub fn touches_core<'a>(&self, domains: impl IntoIterator<Item = &'a str>) -> bool {
        domains.into_iter().any(|d| {
            self.config
                .core_domains
                .iter()
                .any(|core| core.eq_ignore_ascii_case(d.trim()))
        })
    }

    /// Assess a proposal.
    ///
    /// Rules, in priority order:
    /// - **Critical** (threshold 1.0): complexity above the threshold, or a
    ///   core domain is touched.
    /// - **Elevated** (0.85): self-declared novel insight.
    /// - **Low**: the configured default threshold.
    pub fn assess(&self, proposal: &Proposal) -> RiskAssessment {
        let complexity = self.complexity(&proposal.payload.content);
        let domains = std::iter::once(proposal.domain.as_str())
            .chain(proposal.affected_domains.iter().map(String::as_str));
        let core = self.touches_core(domains);

        let (level, required_threshold) = self.classify(complexity, core, proposal.is_novel_insight());

        debug!(
            proposal = %proposal.id,
            complexity,
            core_domain = core,
            level = %level,
            required_threshold,
            "Risk assessed"
        );

        RiskAssessment {
            proposal_id: proposal.id.clone(),
            level,
            required_threshold,
            complexity,
            affected_domains: proposal.affected_domains.clone(),
        }
    }

    /// Risk level for a goal proposal, judged on its objective text.
    pub fn assess_goal(&self, objective: &str, domain: &str) -> RiskLevel {
        let complexity = self.complexity(objective);
        self.classify(complexity, self.touches_core([domain]), false).0
    }

    fn classify(&self, complexity: f64, core: bool, novel: bool) -> (RiskLevel, f64) {
        if complexity > self.config.complexity_threshold || core {
            (RiskLevel::Critical, CRITICAL_THRESHOLD)
        } else if novel {
            (RiskLevel::Elevated, self.config.elevated_threshold)
        } else {
            (RiskLevel::Low, self.config.default_threshold)
        }
    }
}
