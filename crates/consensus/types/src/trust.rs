//! Trust scores and point-in-time snapshots.

use crate::ids::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Agent reliability in [0, 1]. Construction always clamps.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustScore(f64);

impl TrustScore {
    /// Neutral baseline for unseen or silent agents.
    pub const NEUTRAL: TrustScore = TrustScore(0.5);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::NEUTRAL;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for TrustScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<TrustScore> for f64 {
    fn from(score: TrustScore) -> Self {
        score.0
    }
}

/// Read-only copy of registry scores taken at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrustSnapshot {
    scores: HashMap<AgentId, f64>,
    /// Score reported for agents missing from `scores`.
    #[serde(default = "neutral")]
    baseline: f64,
}

fn neutral() -> f64 {
    TrustScore::NEUTRAL.value()
}

impl TrustSnapshot {
    pub fn new(scores: HashMap<AgentId, f64>) -> Self {
        Self {
            scores,
            baseline: neutral(),
        }
    }

    /// Report `baseline` for unseen agents instead of the neutral 0.5.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = TrustScore::new(baseline).value();
        self
    }

    /// Score for an agent; the snapshot baseline when absent.
    pub fn get(&self, agent: &AgentId) -> TrustScore {
        self.scores
            .get(agent)
            .map(|s| TrustScore::new(*s))
            .unwrap_or_else(|| TrustScore::new(self.baseline))
    }

    pub fn baseline(&self) -> TrustScore {
        TrustScore::new(self.baseline)
    }

    pub fn insert(&mut self, agent: AgentId, score: TrustScore) {
        self.scores.insert(agent, score.value());
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Default for TrustSnapshot {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}
