//! Per-agent trust state and the outcome update rule.

use crate::config::TrustConfig;
use crate::error::TrustError;
use dashmap::DashMap;
use maple_consensus_types::{Agent, AgentId, AgentRole, TrustScore, TrustSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Direction of an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Failure,
}

impl OutcomeKind {
    fn target(&self) -> f64 {
        match self {
            Self::Success => 1.0,
            Self::Failure => 0.0,
        }
    }
}

/// Score movement produced by one update.
#[derive(Clone, Debug, PartialEq)]
pub struct TrustUpdate {
    pub agent: AgentId,
    pub before: f64,
    pub after: f64,
}

/// Durable shape of one agent's trust state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrustRecord {
    pub agent: Agent,
    pub score: f64,
    pub updates: u64,
    pub absences: u64,
    pub calibrated: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct AgentTrustState {
    pub(crate) agent: Agent,
    pub(crate) score: f64,
    pub(crate) updates: u64,
    pub(crate) absences: u64,
    pub(crate) calibrated: bool,
    /// Updated since the last decay pass.
    pub(crate) touched: bool,
}

impl AgentTrustState {
    pub(crate) fn fresh(agent: Agent, baseline: f64) -> Self {
        Self {
            agent,
            score: baseline,
            updates: 0,
            absences: 0,
            calibrated: false,
            touched: false,
        }
    }
}

/// Process-wide registry of agent trust.
///
/// Each agent's entry is its own exclusive update region: concurrent
/// outcome updates for one agent serialize on the entry lock, updates for
/// different agents proceed independently.
pub struct TrustRegistry {
    pub(crate) config: TrustConfig,
    pub(crate) agents: DashMap<AgentId, AgentTrustState>,
}

impl TrustRegistry {
    pub fn new(config: TrustConfig) -> Result<Self, TrustError> {
        config.validate()?;
        Ok(Self {
            config,
            agents: DashMap::new(),
        })
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Declare an agent and its role. An existing score is left untouched.
    pub fn register_agent(&self, agent: Agent) {
        let baseline = self.config.baseline;
        self.agents
            .entry(agent.id.clone())
            .and_modify(|state| state.agent.role = agent.role.clone())
            .or_insert_with(|| AgentTrustState::fresh(agent, baseline));
    }

    /// The registered agent; unknown agents are generalists.
    pub fn agent(&self, id: &AgentId) -> Agent {
        self.agents
            .get(id)
            .map(|state| state.agent.clone())
            .unwrap_or_else(|| Agent::new(id.clone(), AgentRole::Generalist))
    }

    pub fn is_known(&self, id: &AgentId) -> bool {
        self.agents.contains_key(id)
    }

    /// Current trust; the neutral baseline for unseen agents.
    pub fn get_trust(&self, id: &AgentId) -> TrustScore {
        self.agents
            .get(id)
            .map(|state| TrustScore::new(state.score))
            .unwrap_or_else(|| TrustScore::new(self.config.baseline))
    }

    /// Apply one outcome: `new = old + lr * magnitude * (target - old)`.
    ///
    /// The effective rate is clamped to `[0, 1]`, so the result never leaves
    /// `[0, 1]`. Unknown agents are registered as generalists first.
    pub fn record_outcome(&self, id: &AgentId, outcome: OutcomeKind, magnitude: f64) -> TrustUpdate {
        let magnitude = if magnitude.is_finite() {
            magnitude.max(0.0)
        } else {
            0.0
        };
        let rate = (self.config.learning_rate * magnitude).clamp(0.0, 1.0);
        let baseline = self.config.baseline;

        let mut entry = self
            .agents
            .entry(id.clone())
            .or_insert_with(|| AgentTrustState::fresh(Agent::generalist(id.clone()), baseline));

        let before = entry.score;
        let after = (before + rate * (outcome.target() - before)).clamp(0.0, 1.0);
        entry.score = after;
        entry.updates += 1;
        entry.touched = true;
        drop(entry);

        debug!(
            agent = %id,
            outcome = ?outcome,
            before,
            after,
            "Trust updated"
        );

        TrustUpdate {
            agent: id.clone(),
            before,
            after,
        }
    }

    /// Record a non-vote. Neutral: the score is never changed.
    pub fn record_absence(&self, id: &AgentId) {
        let baseline = self.config.baseline;
        let mut entry = self
            .agents
            .entry(id.clone())
            .or_insert_with(|| AgentTrustState::fresh(Agent::generalist(id.clone()), baseline));
        entry.absences += 1;
        debug!(agent = %id, absences = entry.absences, "Agent absent from round");
    }

    /// Number of recorded non-votes for an agent.
    pub fn absences(&self, id: &AgentId) -> u64 {
        self.agents.get(id).map(|s| s.absences).unwrap_or(0)
    }

    /// Pull every agent not updated since the previous pass one decay step
    /// toward the baseline, then start a new pass. Returns the agents moved.
    pub fn decay_idle(&self) -> Vec<AgentId> {
        let step = self.config.decay_step;
        let baseline = self.config.baseline;
        let mut decayed = Vec::new();

        for mut entry in self.agents.iter_mut() {
            let agent = entry.key().clone();
            let state = entry.value_mut();
            if !state.touched {
                let before = state.score;
                let after = if before > baseline {
                    (before - step).max(baseline)
                } else {
                    (before + step).min(baseline)
                };
                if after != before {
                    state.score = after;
                    decayed.push(agent);
                }
            }
            state.touched = false;
        }

        if !decayed.is_empty() {
            info!(agents = decayed.len(), step, "Idle trust decayed toward baseline");
        }
        decayed
    }

    /// Copy of every score.
    pub fn snapshot(&self) -> TrustSnapshot {
        let scores: HashMap<AgentId, f64> = self
            .agents
            .iter()
            .map(|entry| (entry.key().clone(), entry.score))
            .collect();
        TrustSnapshot::new(scores).with_baseline(self.config.baseline)
    }

    /// Durable records for the persistence collaborator, ordered by agent id.
    pub fn records(&self) -> Vec<TrustRecord> {
        let mut records: Vec<TrustRecord> = self
            .agents
            .iter()
            .map(|entry| TrustRecord {
                agent: entry.agent.clone(),
                score: entry.score,
                updates: entry.updates,
                absences: entry.absences,
                calibrated: entry.calibrated,
            })
            .collect();
        records.sort_by(|a, b| a.agent.id.cmp(&b.agent.id));
        records
    }

    /// Load persisted records, replacing any in-memory state for those agents.
    pub fn restore(&self, records: Vec<TrustRecord>) -> Result<usize, TrustError> {
        for record in &records {
            if !record.score.is_finite() || !(0.0..=1.0).contains(&record.score) {
                return Err(TrustError::InvalidRecord {
                    agent: record.agent.id.to_string(),
                    reason: format!("score {} outside [0, 1]", record.score),
                });
            }
        }
        let count = records.len();
        for record in records {
            self.agents.insert(
                record.agent.id.clone(),
                AgentTrustState {
                    agent: record.agent,
                    score: record.score,
                    updates: record.updates,
                    absences: record.absences,
                    calibrated: record.calibrated,
                    touched: false,
                },
            );
        }
        info!(records = count, "Trust registry restored");
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for TrustRegistry {
    fn default() -> Self {
        Self {
            config: TrustConfig::default(),
            agents: DashMap::new(),
        }
    }
}
