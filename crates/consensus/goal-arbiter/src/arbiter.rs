use crate::error::ArbiterError;
use crate::state::GlobalState;
use maple_consensus_intent_cache::IntentCache;
use maple_consensus_types::{
    Agent, AgentId, GoalId, GoalProposal, RiskLevel, TaskContext, TrustSnapshot,
};
use maple_consensus_weighting::ContextualWeighter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// How strongly cached intent confidence raises a domain's alignment.
    pub alignment_gain: f64,
    /// Divisor applied to critical-risk goals.
    pub critical_penalty: f64,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            alignment_gain: 0.5,
            critical_penalty: 2.0,
        }
    }
}

impl ArbiterConfig {
    pub fn validate(&self) -> Result<(), ArbiterError> {
        if !self.alignment_gain.is_finite() || self.alignment_gain < 0.0 {
            return Err(ArbiterError::InvalidConfig(format!(
                "alignment_gain {} must be finite and non-negative",
                self.alignment_gain
            )));
        }
        if !self.critical_penalty.is_finite() || self.critical_penalty < 1.0 {
            return Err(ArbiterError::InvalidConfig(format!(
                "critical_penalty {} must be >= 1",
                self.critical_penalty
            )));
        }
        Ok(())
    }
}

/// Score breakdown for one goal candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub goal_id: GoalId,
    pub agent_id: AgentId,
    pub alignment: f64,
    pub strategic_value: f64,
    pub agent_weight: f64,
    pub risk_penalty: f64,
    pub score: f64,
}

/// Result of one negotiation round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSelection {
    pub winner: GoalProposal,
    /// Every candidate, in submission order.
    pub candidates: Vec<CandidateScore>,
}

impl GoalSelection {
    pub fn winning_score(&self) -> Option<&CandidateScore> {
        self.candidates.iter().find(|c| c.goal_id == self.winner.id)
    }
}

/// Stateless goal selection.
#[derive(Debug, Clone, Default)]
pub struct GoalArbiter {
    config: ArbiterConfig,
}

impl GoalArbiter {
    pub fn new(config: ArbiterConfig) -> Result<Self, ArbiterError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    /// `priority(domain) * (1 + gain * top_confidence(domain))`.
    pub fn intent_alignment(&self, state: &GlobalState, intents: &IntentCache, domain: &str) -> f64 {
        let confidence = intents.top_confidence(domain).unwrap_or(0.0);
        state.priority(domain) * (1.0 + self.config.alignment_gain * confidence)
    }

    pub fn risk_penalty(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Critical => self.config.critical_penalty,
            RiskLevel::Low | RiskLevel::Elevated => 1.0,
        }
    }

    /// Score every goal and pick the best.
    ///
    /// Highest score wins; ties go to the lowest `submission_index`, then to
    /// the earlier position in `goals`. Agents missing from `agents` are
    /// weighted as generalists. Returns `None` only for an empty round.
    pub fn select_goal(
        &self,
        goals: &[GoalProposal],
        trust: &TrustSnapshot,
        state: &GlobalState,
        intents: &IntentCache,
        weighter: &ContextualWeighter,
        agents: &[Agent],
    ) -> Option<GoalSelection> {
        let candidates: Vec<CandidateScore> = goals
            .iter()
            .map(|goal| self.score(goal, trust, state, intents, weighter, agents))
            .collect();

        let mut best: Option<usize> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            best = match best {
                None => Some(i),
                Some(j) => {
                    let by_score = candidate
                        .score
                        .partial_cmp(&candidates[j].score)
                        .unwrap_or(Ordering::Equal);
                    let earlier = goals[i].submission_index < goals[j].submission_index;
                    match by_score {
                        Ordering::Greater => Some(i),
                        Ordering::Equal if earlier => Some(i),
                        _ => Some(j),
                    }
                }
            };
        }

        let winner = goals[best?].clone();
        info!(
            goal = %winner.id,
            agent = %winner.agent_id,
            domain = %winner.domain,
            candidates = candidates.len(),
            "Goal selected"
        );

        Some(GoalSelection { winner, candidates })
    }

    fn score(
        &self,
        goal: &GoalProposal,
        trust: &TrustSnapshot,
        state: &GlobalState,
        intents: &IntentCache,
        weighter: &ContextualWeighter,
        agents: &[Agent],
    ) -> CandidateScore {
        let agent = agents
            .iter()
            .find(|a| a.id == goal.agent_id)
            .cloned()
            .unwrap_or_else(|| Agent::generalist(goal.agent_id.clone()));

        let ctx = TaskContext::for_domain(goal.domain.clone()).with_risk(goal.risk_level);
        let (_, agent_weight) = weighter.adjusted_trust(&agent, &ctx, trust.get(&goal.agent_id));

        let reward = if goal.estimated_reward.is_finite() {
            goal.estimated_reward
        } else {
            0.0
        };
        let alignment = self.intent_alignment(state, intents, &goal.domain);
        let strategic_value = reward * alignment;
        let risk_penalty = self.risk_penalty(goal.risk_level);
        let score = strategic_value * agent_weight / risk_penalty;

        debug!(
            goal = %goal.id,
            alignment,
            strategic_value,
            agent_weight,
            risk_penalty,
            score,
            "Goal scored"
        );

        CandidateScore {
            goal_id: goal.id.clone(),
            agent_id: goal.agent_id.clone(),
            alignment,
            strategic_value,
            agent_weight,
            risk_penalty,
            score,
        }
    }
}
