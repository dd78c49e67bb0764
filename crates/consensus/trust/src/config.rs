use crate::error::TrustError;
use serde::{Deserialize, Serialize};

/// Trust learning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Score for unseen agents and the decay target.
    pub baseline: f64,
    /// EMA step per unit-magnitude outcome.
    pub learning_rate: f64,
    /// Fixed pull toward the baseline per idle negotiation round.
    pub decay_step: f64,
    /// Pseudo-count of neutral evidence blended into calibration.
    pub calibration_prior_weight: f64,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            baseline: 0.5,
            learning_rate: 0.1,
            decay_step: 0.02,
            calibration_prior_weight: 2.0,
        }
    }
}

impl TrustConfig {
    pub fn validate(&self) -> Result<(), TrustError> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.baseline) {
            return Err(TrustError::InvalidConfig(format!(
                "baseline {} outside [0, 1]",
                self.baseline
            )));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(TrustError::InvalidConfig(format!(
                "learning_rate {} outside (0, 1]",
                self.learning_rate
            )));
        }
        if !unit.contains(&self.decay_step) {
            return Err(TrustError::InvalidConfig(format!(
                "decay_step {} outside [0, 1]",
                self.decay_step
            )));
        }
        if !(self.calibration_prior_weight >= 0.0) {
            return Err(TrustError::InvalidConfig(
                "calibration_prior_weight must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
