//! Baseline calibration for agents that have not yet taken part in live
//! decisions.

use crate::registry::{AgentTrustState, TrustRegistry};
use maple_consensus_types::{Agent, AgentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// One held-out evaluation of an agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub agent: Agent,
    pub success: bool,
}

impl CalibrationSample {
    pub fn new(agent: Agent, success: bool) -> Self {
        Self { agent, success }
    }
}

/// What a calibration pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalibrationReport {
    /// Agents given a baseline, with that baseline.
    pub calibrated: Vec<(AgentId, f64)>,
    /// Agents skipped because they already have live history.
    pub skipped: Vec<AgentId>,
}

impl TrustRegistry {
    /// Establish baselines from held-out evaluations.
    ///
    /// Only agents with no live outcomes and no earlier calibration are
    /// touched. The baseline is the success rate shrunk toward the neutral
    /// score: `(successes + prior * baseline) / (total + prior)`.
    pub fn calibrate(&self, samples: &[CalibrationSample]) -> CalibrationReport {
        let mut grouped: BTreeMap<AgentId, (Agent, u64, u64)> = BTreeMap::new();
        for sample in samples {
            let slot = grouped
                .entry(sample.agent.id.clone())
                .or_insert_with(|| (sample.agent.clone(), 0, 0));
            slot.1 += 1;
            if sample.success {
                slot.2 += 1;
            }
        }

        let prior = self.config.calibration_prior_weight;
        let neutral = self.config.baseline;
        let mut report = CalibrationReport::default();

        for (id, (agent, total, successes)) in grouped {
            let mut entry = self
                .agents
                .entry(id.clone())
                .or_insert_with(|| AgentTrustState::fresh(agent, neutral));
            if entry.updates > 0 || entry.calibrated {
                report.skipped.push(id);
                continue;
            }
            let score = ((successes as f64 + prior * neutral) / (total as f64 + prior))
                .clamp(0.0, 1.0);
            entry.score = score;
            entry.calibrated = true;
            report.calibrated.push((id, score));
        }

        info!(
            calibrated = report.calibrated.len(),
            skipped = report.skipped.len(),
            "Trust calibration pass complete"
        );
        report
    }
}
