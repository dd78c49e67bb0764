use serde::{Deserialize, Serialize};

/// Running counters for the consensus engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsensusMetrics {
    /// Rounds committed.
    pub rounds: u64,
    /// Rounds cancelled before commit.
    pub cancelled_rounds: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub escalated: u64,
    /// Subset of `rejected` that failed validation.
    pub malformed: u64,
    /// Resubmitted proposal ids; not counted as decisions.
    pub duplicates: u64,
    /// Agents that missed the collection deadline.
    pub timeouts: u64,
    /// Agents whose source returned an error.
    pub source_errors: u64,
    pub intents_cached: u64,
    pub verdicts_applied: u64,
    pub escalations_expired: u64,
    pub goal_rounds: u64,
    /// Store or review-channel calls that failed after commit.
    pub store_failures: u64,
}

impl ConsensusMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decided(&self) -> u64 {
        self.accepted + self.rejected + self.escalated
    }

    pub fn acceptance_rate(&self) -> f64 {
        let decided = self.decided();
        if decided == 0 {
            return 0.0;
        }
        self.accepted as f64 / decided as f64
    }

    pub fn escalation_rate(&self) -> f64 {
        let decided = self.decided();
        if decided == 0 {
            return 0.0;
        }
        self.escalated as f64 / decided as f64
    }
}
